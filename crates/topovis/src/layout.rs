//! Layout engines assigning planar positions to topology nodes.
//!
//! # Pipeline Position
//!
//! ```text
//! Graph
//!     ↓ layout (this module)
//! PositionMap
//!     ↓ export
//! SVG
//! ```
//!
//! Both engines lay the graph out in layers by breadth-first traversal from
//! the root; nodes without a path to the root receive no position.
//!
//! # Submodules
//!
//! - [`layered`] - Float layering with logistic vertical spacing (default)
//! - [`block`] - Integer grid layering with parent-index averaging
//! - [`normalize`] - Rescaling a position map into a target rectangle

pub mod block;
mod engines;
pub mod layered;
pub mod normalize;

pub use block::BlockLayout;
pub use engines::{Engine, EngineBuilder, LayoutEngine};
pub use layered::LayerLayout;
pub use normalize::normalize;

use std::collections::HashSet;

use indexmap::IndexMap;

use topovis_core::{geometry::Point, identifier::NodeId};

use crate::graph::Graph;

/// Node positions in placement order, root first.
pub type PositionMap = IndexMap<NodeId, Point>;

/// Collects the unvisited neighbors of `layer` in first-seen order and marks
/// them visited.
fn next_layer(graph: &Graph, layer: &[NodeId], visited: &mut HashSet<NodeId>) -> Vec<NodeId> {
    let mut next = Vec::new();
    for node in layer {
        for neighbor in graph.neighbors(node.as_str()) {
            if visited.insert(neighbor.clone()) {
                next.push(neighbor.clone());
            }
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_layer_deduplicates_shared_neighbors() {
        let graph = Graph::build([("r", "a"), ("r", "b"), ("a", "c"), ("b", "c"), ("b", "d")], "r")
            .unwrap();
        let mut visited = HashSet::from([graph.root().clone()]);

        let first = next_layer(&graph, &[graph.root().clone()], &mut visited);
        let second = next_layer(&graph, &first, &mut visited);

        assert_eq!(first, ["a", "b"]);
        assert_eq!(second, ["c", "d"]);
        assert!(next_layer(&graph, &second, &mut visited).is_empty());
    }
}
