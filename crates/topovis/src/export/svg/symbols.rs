//! One shared `<defs>` entry per distinct icon reference.

use indexmap::IndexMap;
use log::warn;
use svg::node::element as svg_element;

use topovis_core::{
    draw::{IconSymbol, icon_symbol_id},
    geometry::Size,
};

use crate::icon::IconLibrary;

/// Icon reference → symbol element id, in first-use order.
#[derive(Debug, Default)]
pub struct IconSymbolTable<'a> {
    symbols: IndexMap<&'a str, String>,
}

impl<'a> IconSymbolTable<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the symbol id for `reference`, registering it on first use.
    pub fn symbol_id(&mut self, reference: &'a str) -> &str {
        let next_index = self.symbols.len();
        self.symbols
            .entry(reference)
            .or_insert_with(|| icon_symbol_id(next_index, reference))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Renders every registered symbol into a `<defs>` element.
    ///
    /// References without an asset in `library` get a placeholder glyph.
    pub fn render(
        &self,
        footprint: Size,
        scale: f32,
        library: Option<&IconLibrary>,
    ) -> svg_element::Definitions {
        self.symbols
            .iter()
            .fold(svg_element::Definitions::new(), |defs, (reference, id)| {
                let asset = library.and_then(|library| library.get(reference));
                if asset.is_none() {
                    warn!(icon = *reference; "No asset loaded for icon, drawing placeholder");
                }

                let symbol = IconSymbol::new(id.clone(), reference, footprint, scale).with_asset(asset);
                defs.add(symbol.render())
            })
    }
}
