//! Icon symbols and their uses.
//!
//! Every distinct icon of a diagram is emitted once as an [`IconSymbol`]
//! (a nested `<svg>` inside `<defs>`) and referenced by each node through an
//! [`IconUse`].

use std::ops::Range;

use svg::{
    Node as _,
    node::{Blob, Text as SvgText, element as svg_element},
};

use crate::{
    draw::{Drawable, SvgNode},
    geometry::{Point, Size},
};

/// Builds a document-unique, XML-safe element id for the `index`-th icon symbol.
///
/// # Examples
///
/// ```
/// # use topovis_core::draw::icon_symbol_id;
/// assert_eq!(icon_symbol_id(0, "osa_server.svg"), "icon-0-osa_server_svg");
/// ```
pub fn icon_symbol_id(index: usize, reference: &str) -> String {
    let sanitized: String = reference
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("icon-{index}-{sanitized}")
}

/// A reusable icon definition.
///
/// The symbol viewport is the icon footprint. The asset root carries the
/// view box: the footprint divided by the icon scale, shifted up and left by
/// a quarter of that span, which draws the asset scaled down and centered
/// inside the footprint.
#[derive(Debug, Clone)]
pub struct IconSymbol<'a> {
    id: String,
    reference: &'a str,
    footprint: Size,
    scale: f32,
    asset: Option<&'a str>,
}

impl<'a> IconSymbol<'a> {
    pub fn new(id: String, reference: &'a str, footprint: Size, scale: f32) -> Self {
        Self {
            id,
            reference,
            footprint,
            scale,
            asset: None,
        }
    }

    /// Embeds the SVG markup of the icon asset (builder style).
    pub fn with_asset(mut self, asset: Option<&'a str>) -> Self {
        self.asset = asset;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn reference(&self) -> &str {
        self.reference
    }

    /// Returns the `(min_x, min_y, width, height)` view box of the asset.
    pub fn view_box(&self) -> (f32, f32, f32, f32) {
        let span = self.footprint.scale(1.0 / self.scale);
        let min = span.scale(-0.25);
        (min.width(), min.height(), span.width(), span.height())
    }

    fn view_box_value(&self) -> String {
        let (min_x, min_y, width, height) = self.view_box();
        format!("{min_x} {min_y} {width} {height}")
    }

    /// Renders the symbol definition for inclusion in `<defs>`.
    ///
    /// An asset that is not well-formed is replaced by the placeholder.
    pub fn render(&self) -> SvgNode {
        let symbol = svg_element::SVG::new()
            .set("id", self.id.as_str())
            .set("width", self.footprint.width())
            .set("height", self.footprint.height())
            .add(self.description());

        let symbol = match self.asset.and_then(|asset| self.fit_asset(asset).ok()) {
            Some(asset) => symbol.add(Blob::new(asset)),
            None => symbol.add(self.placeholder()),
        };

        Box::new(symbol)
    }

    fn description(&self) -> svg_element::Element {
        let mut desc = svg_element::Element::new("desc");
        desc.append(SvgText::new(self.reference));
        desc
    }

    /// Returns the root element of `asset` with its view box replaced and its
    /// size set to fill the symbol viewport.
    fn fit_asset(&self, asset: &str) -> Result<String, roxmltree::Error> {
        let document = roxmltree::Document::parse(asset)?;
        let root = document.root_element();
        let element = root.range();

        let mut fitted = [
            ("viewBox", self.view_box_value()),
            ("width", "100%".to_string()),
            ("height", "100%".to_string()),
        ]
        .map(|(name, value)| (name, value, None::<Range<usize>>));

        for attribute in root.attributes().filter(|a| a.namespace().is_none()) {
            if let Some(entry) = fitted.iter_mut().find(|(name, ..)| *name == attribute.name()) {
                entry.2 = Some(attribute.range_value());
            }
        }

        // Missing attributes go right after the tag name
        let tag = &asset[element.clone()];
        let name_end = element.start
            + 1
            + tag[1..]
                .find(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
                .unwrap_or(0);

        let mut out = String::with_capacity(tag.len() + 64);
        out.push_str(&asset[element.start..name_end]);
        for (name, value, _) in fitted.iter().filter(|(.., range)| range.is_none()) {
            out.push_str(&format!(" {name}=\"{value}\""));
        }

        let mut replaced: Vec<_> = fitted
            .iter()
            .filter_map(|(_, value, range)| range.clone().map(|range| (range, value)))
            .collect();
        replaced.sort_by_key(|(range, _)| range.start);

        let mut cursor = name_end;
        for (range, value) in replaced {
            out.push_str(&asset[cursor..range.start]);
            out.push_str(value);
            cursor = range.end;
        }
        out.push_str(&asset[cursor..element.end]);

        Ok(out)
    }

    /// A neutral glyph drawn in place of a missing asset, sized like an asset
    /// filling the footprint.
    fn placeholder(&self) -> svg_element::SVG {
        let center = self.footprint.scale(0.5);
        let glyph = svg_element::Circle::new()
            .set("class", "icon-placeholder")
            .set("cx", center.width())
            .set("cy", center.height())
            .set("r", center.width().min(center.height()) * 0.75)
            .set("fill", "none")
            .set("stroke", "black")
            .set("stroke-width", 4);

        svg_element::SVG::new()
            .set("viewBox", self.view_box_value())
            .set("width", "100%")
            .set("height", "100%")
            .add(glyph)
    }
}

/// A `<use>` of an icon symbol, centered on its anchor point.
#[derive(Debug, Clone)]
pub struct IconUse {
    symbol_id: String,
    footprint: Size,
}

impl IconUse {
    pub fn new(symbol_id: impl Into<String>, footprint: Size) -> Self {
        Self {
            symbol_id: symbol_id.into(),
            footprint,
        }
    }

    pub fn symbol_id(&self) -> &str {
        &self.symbol_id
    }
}

impl Drawable for IconUse {
    fn render_to_svg(&self, position: Point) -> SvgNode {
        let top_left = position.sub_point(self.footprint.scale(0.5).to_point());

        let icon = svg_element::Use::new()
            .set("href", format!("#{}", self.symbol_id))
            .set("x", top_left.x())
            .set("y", top_left.y())
            .set("width", self.footprint.width())
            .set("height", self.footprint.height());

        Box::new(icon)
    }

    fn size(&self) -> Size {
        self.footprint
    }
}
