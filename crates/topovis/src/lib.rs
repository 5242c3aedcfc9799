//! Topovis - layout and SVG rendering of rooted network topology diagrams.
//!
//! A topology is an undirected graph with a designated root (the public
//! internet for traced networks). Nodes are laid out in layers by distance
//! from the root, rescaled onto a canvas, and drawn as icons with stacked
//! labels joined by straight edges.

pub mod classify;
pub mod config;
pub mod diagram;
pub mod export;
pub mod graph;
pub mod icon;
pub mod layout;

mod error;

pub use topovis_core::{color, draw, geometry, identifier};
pub use topovis_trace::{Topology, TraceNode};

pub use diagram::{Diagram, Metadata, NodeDecorations};
pub use error::TopoError;

use log::{debug, info, trace};

use classify::PatternClassifier;
use config::AppConfig;
use export::Exporter;
use icon::IconLibrary;
use layout::{EngineBuilder, LayoutEngine, PositionMap};

/// Builder for turning topologies into SVG diagrams.
///
/// # Examples
///
/// ```rust,no_run
/// use topovis::{DiagramBuilder, config::AppConfig};
///
/// let source = std::fs::read_to_string("scan.xml").expect("Failed to read");
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// for topology in builder.parse_trace(&source).expect("Failed to parse") {
///     let diagram = builder.diagram(topology).expect("Invalid topology");
///     let svg = builder.render_svg(&diagram).expect("Failed to render");
///     println!("{svg}");
/// }
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
    icons: IconLibrary,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            icons: IconLibrary::default(),
        }
    }

    /// Supplies the icon assets embedded into rendered diagrams.
    pub fn with_icons(mut self, icons: IconLibrary) -> Self {
        self.icons = icons;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a trace document into one topology per network.
    ///
    /// # Errors
    ///
    /// Returns [`TopoError::Trace`] carrying `source` if the document is
    /// malformed.
    pub fn parse_trace(&self, source: &str) -> Result<Vec<Topology>, TopoError> {
        info!("Parsing trace document");

        let topologies =
            topovis_trace::parse_str(source).map_err(|err| TopoError::new_trace_error(err, source))?;

        debug!(networks = topologies.len(); "Trace document parsed");
        Ok(topologies)
    }

    /// Returns the classifier configured by `classify`.
    ///
    /// # Errors
    ///
    /// Returns [`TopoError::Config`] if a pattern does not compile.
    pub fn classifier(&self) -> Result<PatternClassifier, TopoError> {
        PatternClassifier::new(self.config.classify()).map_err(TopoError::Config)
    }

    /// Build a classified diagram from a topology.
    ///
    /// # Errors
    ///
    /// Returns [`TopoError::Config`] for invalid classifier patterns or
    /// [`TopoError::InvalidGraph`] if the topology does not form a graph.
    pub fn diagram(&self, topology: Topology) -> Result<Diagram, TopoError> {
        info!(network = topology.name(); "Building diagram");
        let classifier = self.classifier()?;
        let diagram = Diagram::from_topology(topology, &classifier)?;

        debug!(
            nodes = diagram.graph().node_count(),
            edges = diagram.graph().edge_count();
            "Diagram built"
        );
        trace!(diagram:?; "Built diagram");

        Ok(diagram)
    }

    /// Lay out the nodes of `diagram` that are reachable from its root.
    ///
    /// # Errors
    ///
    /// Returns [`TopoError::InvalidGraph`] if connectivity is required and a
    /// node is unreachable, or [`TopoError::Layout`] if the engine cannot
    /// place a node.
    pub fn layout(&self, diagram: &Diagram, engine: LayoutEngine) -> Result<PositionMap, TopoError> {
        let positions = EngineBuilder::new()
            .with_require_connected(self.config.layout().require_connected())
            .build(diagram.graph(), engine)?;

        info!(nodes = positions.len(); "Layout calculated");
        Ok(positions)
    }

    /// Render a diagram to SVG with the configured layout engine.
    ///
    /// # Errors
    ///
    /// Returns `TopoError` for layout or rendering errors.
    pub fn render_svg(&self, diagram: &Diagram) -> Result<String, TopoError> {
        self.render_svg_with(diagram, self.config.layout().engine())
    }

    /// Render a diagram to SVG with an explicit layout engine.
    ///
    /// # Errors
    ///
    /// Returns `TopoError` for layout or rendering errors.
    pub fn render_svg_with(&self, diagram: &Diagram, engine: LayoutEngine) -> Result<String, TopoError> {
        let positions = self.layout(diagram, engine)?;

        let exporter = export::svg::SvgBuilder::new()
            .with_style(self.config.style())
            .with_icons(self.config.icons())
            .with_library(&self.icons)
            .build()?;
        let bytes = exporter.export(diagram, &positions)?;

        // svg::write only emits UTF-8
        let svg = String::from_utf8_lossy(&bytes).into_owned();
        info!(title = diagram.title(); "SVG rendered successfully");
        Ok(svg)
    }
}
