mod canvas;
mod metadata;
mod symbols;

pub use canvas::Canvas;
pub use symbols::IconSymbolTable;

use log::{debug, info};
use svg::{Document, node::element as svg_element};

use topovis_core::{
    color::Color,
    draw::{
        Caption, Drawable as _, EdgeDefinition, EdgeLine, IconUse, LabelStack, LayeredOutput,
        RenderLayer, TextDefinition,
    },
    geometry::Size,
};

use crate::{
    config::{IconConfig, StyleConfig},
    diagram::Diagram,
    error::TopoError,
    export::{self, Exporter},
    icon::IconLibrary,
    layout::PositionMap,
};

/// Configures an [`Svg`] renderer.
#[derive(Debug, Default)]
pub struct SvgBuilder<'a> {
    style: StyleConfig,
    icons: IconConfig,
    library: Option<&'a IconLibrary>,
}

impl<'a> SvgBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: &StyleConfig) -> Self {
        self.style = style.clone();
        self
    }

    pub fn with_icons(mut self, icons: &IconConfig) -> Self {
        self.icons = icons.clone();
        self
    }

    /// Supplies the icon assets embedded into the symbol definitions.
    pub fn with_library(mut self, library: &'a IconLibrary) -> Self {
        self.library = Some(library);
        self
    }

    /// Resolves the configured colors and fonts.
    ///
    /// # Errors
    ///
    /// Returns [`TopoError::Config`] if a configured color does not parse.
    pub fn build(self) -> Result<Svg<'a>, TopoError> {
        let background = self.style.background_color().map_err(TopoError::Config)?;
        let edge_color = self.style.edge_color().map_err(TopoError::Config)?;
        let edge_style = self.style.edge_style().map_err(TopoError::Config)?;
        let text_color = self.style.text_color().map_err(TopoError::Config)?;

        let mut text = TextDefinition::new();
        if let Some(color) = text_color {
            text.set_color(color);
        }
        if let Some(family) = self.style.font_family() {
            text.set_font_family(family);
        }
        if let Some(size) = self.style.font_size() {
            text.set_font_size(size);
        }

        let defaults = EdgeDefinition::default();
        let mut edge = EdgeDefinition::new(
            edge_color.unwrap_or(defaults.color()),
            self.style.edge_width().unwrap_or(defaults.width()),
        );
        if let Some(style) = edge_style {
            edge.set_style(style);
        }

        Ok(Svg {
            background: background.unwrap_or_else(Color::white),
            edge,
            text,
            footprint: Size::square(self.icons.footprint()),
            scale: self.icons.scale(),
            default_icon: self.icons.default_icon().to_string(),
            library: self.library,
        })
    }
}

/// Renders positioned diagrams into SVG documents.
///
/// Rendering never touches the filesystem: icon assets come from the
/// [`IconLibrary`] handed to the builder.
#[derive(Debug, Clone)]
pub struct Svg<'a> {
    background: Color,
    edge: EdgeDefinition,
    text: TextDefinition,
    footprint: Size,
    scale: f32,
    default_icon: String,
    library: Option<&'a IconLibrary>,
}

impl Svg<'_> {
    /// Renders `diagram` with its reachable nodes at `positions`.
    ///
    /// Positions may use any coordinate range; they are rescaled onto a
    /// canvas sized from their count.
    ///
    /// # Errors
    ///
    /// Returns an [`export::Error`] if `positions` and the diagram disagree.
    pub fn render(&self, diagram: &Diagram, positions: &PositionMap) -> Result<Document, export::Error> {
        check_positions(diagram, positions)?;

        let canvas = Canvas::for_node_count(positions.len());
        debug!(
            nodes = positions.len(),
            width = canvas.width(),
            height = canvas.height();
            "Canvas sized"
        );

        let placed = canvas.place(positions);
        let mut symbols = IconSymbolTable::new();
        let mut output = LayeredOutput::new();

        let background = svg_element::Rectangle::new()
            .set("class", "background")
            .set("width", "100%")
            .set("height", "100%")
            .set("fill", self.background);
        output.add_to_layer(RenderLayer::Background, Box::new(background));

        let caption = Caption::new(&self.text, diagram.title());
        output.add_to_layer(RenderLayer::Caption, caption.render_to_svg(canvas.title_anchor()));

        let line = EdgeLine::new(&self.edge);
        for (source, target) in diagram.graph().edges() {
            // Edges touching excluded nodes are not drawn
            if let (Some(&source), Some(&target)) = (placed.get(source), placed.get(target)) {
                output.add_to_layer(RenderLayer::Edge, line.render(source, target));
            }
        }

        let decorations = diagram.decorations();
        for (node, &position) in &placed {
            let icon = decorations
                .icon(node.as_str())
                .unwrap_or(self.default_icon.as_str());
            let symbol_id = symbols.symbol_id(icon);
            let label = decorations.label(node.as_str()).unwrap_or(node.as_str());
            let kind = decorations.node_type(node.as_str()).unwrap_or("misc");

            let group = svg_element::Group::new()
                .set("class", format!("node node-{}", class_name(kind)))
                .set("data-node", node.as_str())
                .add(IconUse::new(symbol_id, self.footprint).render_to_svg(position))
                .add(LabelStack::new(&self.text, label).render_to_svg(position));
            output.add_to_layer(RenderLayer::Node, Box::new(group));
        }
        debug!(symbols = symbols.len(); "Icon symbols collected");

        let mut doc = Document::new()
            .set("width", canvas.width())
            .set("height", canvas.height())
            .set(
                "viewBox",
                format!("0 0 {} {}", canvas.width(), canvas.height()),
            )
            .add(metadata::title(diagram.title()))
            .add(metadata::description())
            .add(metadata::metadata(diagram.metadata()))
            .add(symbols.render(self.footprint, self.scale, self.library));

        for node in output.render() {
            doc = doc.add(node);
        }

        Ok(doc)
    }
}

impl Exporter for Svg<'_> {
    fn export(&self, diagram: &Diagram, positions: &PositionMap) -> Result<Vec<u8>, export::Error> {
        let doc = self.render(diagram, positions)?;

        let mut bytes = Vec::new();
        svg::write(&mut bytes, &doc)?;
        info!(title = diagram.title(), bytes = bytes.len(); "SVG document rendered");

        Ok(bytes)
    }
}

/// Checks that `positions` covers the root, only names graph nodes, and
/// that every decorated node is either positioned or excluded from layout.
fn check_positions(diagram: &Diagram, positions: &PositionMap) -> Result<(), export::Error> {
    let graph = diagram.graph();

    if !positions.contains_key(graph.root()) {
        return Err(export::Error::UnpositionedRoot(graph.root().clone()));
    }

    if let Some(node) = positions.keys().find(|node| !graph.contains(node.as_str())) {
        return Err(export::Error::UnknownNode(node.clone()));
    }

    for (node, attribute) in diagram.decorations().keys() {
        if positions.contains_key(node) {
            continue;
        }
        if graph.contains(node.as_str()) {
            debug!(node = node.as_str(), attribute = attribute; "Skipping decoration of unpositioned node");
            continue;
        }
        return Err(export::Error::UnpositionedNode {
            node: node.clone(),
            attribute,
        });
    }

    Ok(())
}

/// Reduces a node type to a CSS class fragment.
fn class_name(kind: &str) -> String {
    kind.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{diagram::NodeDecorations, graph::Graph};
    use topovis_core::geometry::Point;

    fn chain() -> Diagram {
        let graph = Graph::build([("PUBLIC", "gw"), ("gw", "host")], "PUBLIC").unwrap();
        let mut decorations = NodeDecorations::new();
        decorations.set_label("gw", "gw.lab.example\n10.0.0.1");
        decorations.set_icon("PUBLIC", "osa_cloud.svg");
        decorations.set_icon("gw", "osa_server.svg");
        decorations.set_icon("host", "osa_server.svg");
        decorations.set_type("gw", "firewall");
        Diagram::new("Lab Network", graph).with_decorations(decorations)
    }

    fn chain_positions() -> PositionMap {
        [
            ("PUBLIC".into(), Point::new(0.5, 0.0)),
            ("gw".into(), Point::new(0.5, 0.5)),
            ("host".into(), Point::new(0.5, 1.0)),
        ]
        .into_iter()
        .collect()
    }

    fn render(diagram: &Diagram, positions: &PositionMap) -> String {
        let svg = SvgBuilder::new().build().unwrap();
        svg.render(diagram, positions).unwrap().to_string()
    }

    #[test]
    fn test_chain_renders_edges_and_nodes() {
        let rendered = render(&chain(), &chain_positions());

        assert_eq!(rendered.matches("<line").count(), 2);
        assert_eq!(rendered.matches("class=\"node node-").count(), 3);
        assert!(rendered.contains("node node-firewall"));
        assert!(rendered.contains("gw.lab.example"));
    }

    #[test]
    fn test_icons_share_one_symbol() {
        let rendered = render(&chain(), &chain_positions());

        assert_eq!(rendered.matches("<use").count(), 3);
        assert_eq!(rendered.matches("viewBox=\"-64 -64 256 256\"").count(), 2);
    }

    #[test]
    fn test_single_root() {
        let graph = Graph::build(std::iter::empty::<(&str, &str)>(), "PUBLIC").unwrap();
        let diagram = Diagram::new("Empty Network", graph);
        let positions: PositionMap = [("PUBLIC".into(), Point::new(0.0, 0.0))]
            .into_iter()
            .collect();

        let rendered = render(&diagram, &positions);

        assert_eq!(rendered.matches("<line").count(), 0);
        assert_eq!(rendered.matches("class=\"node node-misc\"").count(), 1);
        // Missing label and icon fall back to the identifier and default icon
        assert!(rendered.contains(">PUBLIC<"));
        assert!(rendered.contains("osa_hub.svg"));
        assert!(rendered.contains("width=\"700\""));
    }

    #[test]
    fn test_z_order() {
        let rendered = render(&chain(), &chain_positions());

        let background = rendered.find("data-layer=\"background\"").unwrap();
        let caption = rendered.find("data-layer=\"caption\"").unwrap();
        let edges = rendered.find("data-layer=\"edges\"").unwrap();
        let nodes = rendered.find("data-layer=\"nodes\"").unwrap();
        assert!(background < caption && caption < edges && edges < nodes);
    }

    #[test]
    fn test_unpositioned_root() {
        let svg = SvgBuilder::new().build().unwrap();
        let mut positions = chain_positions();
        positions.shift_remove("PUBLIC");

        let err = svg.render(&chain(), &positions).unwrap_err();
        assert!(matches!(err, export::Error::UnpositionedRoot(root) if root == "PUBLIC"));
    }

    #[test]
    fn test_unknown_node() {
        let svg = SvgBuilder::new().build().unwrap();
        let mut positions = chain_positions();
        positions.insert("stranger".into(), Point::new(1.0, 1.0));

        let err = svg.render(&chain(), &positions).unwrap_err();
        assert!(matches!(err, export::Error::UnknownNode(node) if node == "stranger"));
    }

    #[test]
    fn test_decoration_without_node() {
        let svg = SvgBuilder::new().build().unwrap();
        let mut diagram = chain();
        diagram.decorations_mut().set_label("ghost", "Ghost");

        let err = svg.render(&diagram, &chain_positions()).unwrap_err();
        assert!(matches!(
            err,
            export::Error::UnpositionedNode { node, attribute: "label" } if node == "ghost"
        ));
    }

    #[test]
    fn test_decoration_of_excluded_node_is_skipped() {
        let mut positions = chain_positions();
        positions.shift_remove("host");

        let rendered = render(&chain(), &positions);

        assert_eq!(rendered.matches("<line").count(), 1);
        assert_eq!(rendered.matches("class=\"node node-").count(), 2);
    }

    #[test]
    fn test_style_overrides() {
        let style: StyleConfig = toml::from_str(
            "background_color = \"#eeeeee\"\nfont_size = 12.0\nedge_style = \"dotted\"\nedge_width = 3.0",
        )
        .unwrap();
        let svg = SvgBuilder::new().with_style(&style).build().unwrap();

        let rendered = svg.render(&chain(), &chain_positions()).unwrap().to_string();
        assert!(rendered.contains("font-size=\"12\""));
        assert_eq!(rendered.matches("stroke-dasharray=\"2,3\"").count(), 2);
        assert!(rendered.contains("stroke-width=\"3\""));
    }

    #[test]
    fn test_invalid_color() {
        let style: StyleConfig = toml::from_str("edge_color = \"not-a-color\"").unwrap();
        let err = SvgBuilder::new().with_style(&style).build().unwrap_err();
        assert!(matches!(err, TopoError::Config(_)));
    }

    #[test]
    fn test_export_writes_bytes() {
        let svg = SvgBuilder::new().build().unwrap();
        let bytes = svg.export(&chain(), &chain_positions()).unwrap();

        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("<svg"));
        assert!(text.contains("<title>Lab Network</title>"));
    }

    #[test]
    fn test_class_name() {
        assert_eq!(class_name("not-a-host"), "not-a-host");
        assert_eq!(class_name("Core Switch"), "core-switch");
    }
}
