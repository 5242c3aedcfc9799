//! Layer-based rendering system for SVG output.
//!
//! This module provides a type-safe layer system that lets the renderer state
//! which z-order layer each SVG element belongs to, independent of the order
//! the elements were produced in.
//!
//! # Example
//!
//! ```
//! # use topovis_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Line, Rectangle};
//! let mut output = LayeredOutput::new();
//!
//! // Produced out of order...
//! output.add_to_layer(RenderLayer::Edge, Box::new(Line::new()));
//! output.add_to_layer(RenderLayer::Background, Box::new(Rectangle::new()));
//!
//! // ...but rendered bottom to top.
//! let svg_nodes = output.render();
//! assert_eq!(svg_nodes.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Defines the rendering layers for SVG output.
///
/// Layers are rendered from bottom to top in the order defined by variant declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Full-canvas background - renders first
    Background,
    /// Diagram title
    Caption,
    /// Lines between nodes
    Edge,
    /// Node groups (icon and label stack)
    Node,
}

impl RenderLayer {
    /// Returns a human-readable name for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Caption => "caption",
            Self::Edge => "edges",
            Self::Node => "nodes",
        }
    }
}

/// Represents SVG nodes grouped by rendering layer.
///
/// When rendered, nodes are emitted in layer order (bottom to top). Within a
/// layer, nodes keep the order they were added in.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single node to the specified layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes an SVG `<g>` element with an `id` and a
    /// `data-layer` attribute naming the layer. Empty layers are skipped.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        // Stable sort keeps insertion order within a layer
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = layer_group(current_layer);

        for (layer, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);

                current_layer = layer;
                current_group = layer_group(layer);
            }

            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);

        result
    }
}

fn layer_group(layer: RenderLayer) -> svg_element::Group {
    svg_element::Group::new()
        .set("id", layer.name())
        .set("data-layer", layer.name())
}
