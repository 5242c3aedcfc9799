//! Breadth-first layered layout with logistic vertical spacing.
//!
//! The root sits at `(0.5, 1.0)`. Each following layer holds the unvisited
//! neighbors of the previous one. A layer is spread horizontally around the
//! x of the first node of the layer above it, and moved down by a distance
//! that grows with the size difference between the two layers:
//!
//! ```text
//! ydist = -1.5 / (1 + e^(-4.5 * |len(top) - len(next)| - 1))
//! ```
//!
//! Within a layer, nodes are nudged alternately by a tenth of that distance
//! so that neighboring labels do not collide. The nudge accumulates, which
//! puts even and odd nodes on two alternating rows.

use std::collections::HashSet;

use log::{debug, trace};

use topovis_core::geometry::{Point, Size};

use super::{Engine, PositionMap, next_layer, normalize};
use crate::{error::TopoError, graph::Graph};

const ROOT_POSITION: (f32, f32) = (0.5, 1.0);

/// The primary layout engine. Positions are normalized into the unit square.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayerLayout;

impl LayerLayout {
    pub fn new() -> Self {
        Self
    }

    /// Lays the graph out and normalizes the result into the unit square
    /// centered on `(0.5, 0.5)`.
    pub fn layout(&self, graph: &Graph) -> PositionMap {
        normalize(
            &self.place(graph),
            Size::new(1.0, 1.0),
            Point::new(0.5, 0.5),
        )
    }

    /// Computes the raw, unnormalized positions.
    pub fn place(&self, graph: &Graph) -> PositionMap {
        let root = graph.root().clone();
        let mut anchor = Point::new(ROOT_POSITION.0, ROOT_POSITION.1);

        let mut positions = PositionMap::new();
        positions.insert(root.clone(), anchor);

        let mut visited = HashSet::from([root.clone()]);
        let mut top = vec![root];

        loop {
            let next = next_layer(graph, &top, &mut visited);
            if next.is_empty() {
                break;
            }

            let ydist = vertical_distance(top.len(), next.len());
            let (xsize, xinc) = horizontal_spread(next.len());
            let mut xcur = anchor.x() - xsize / 2.0;
            let mut y = anchor.y() - ydist;

            trace!(layer_size = next.len(), ydist, xinc; "Placing layer");

            for (i, node) in next.iter().enumerate() {
                if i % 2 == 0 {
                    y += 0.1 * ydist;
                } else {
                    y -= 0.1 * ydist;
                }
                positions.insert(node.clone(), Point::new(xcur, y));
                xcur += xinc;
            }

            if let Some(first) = next.first().and_then(|node| positions.get(node)) {
                anchor = *first;
            }
            top = next;
        }

        debug!(nodes = positions.len(); "Layered placement finished");
        positions
    }
}

impl Engine for LayerLayout {
    fn calculate(&self, graph: &Graph) -> Result<PositionMap, TopoError> {
        Ok(self.layout(graph))
    }
}

/// Logistic vertical distance between a layer of `top` nodes and the next
/// layer of `next` nodes. Always negative.
fn vertical_distance(top: usize, next: usize) -> f32 {
    let diff = top.abs_diff(next) as f32;
    -1.5 / (1.0 + (-4.5 * diff - 1.0).exp())
}

/// Returns the total width of a layer and the step between its nodes.
fn horizontal_spread(count: usize) -> (f32, f32) {
    if count > 1 {
        let xsize = 2.0 * count as f32;
        (xsize, xsize / (count - 1) as f32)
    } else {
        (0.0, 0.0)
    }
}
