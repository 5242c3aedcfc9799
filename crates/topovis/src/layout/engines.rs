//! Layout engine selection.
//!
//! [`LayoutEngine`] names the available algorithms in configuration files and
//! on the command line; [`EngineBuilder`] resolves a name to an [`Engine`] and
//! applies the connectivity policy before running it.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use log::{info, warn};
use serde::Deserialize;

use super::{BlockLayout, LayerLayout, PositionMap};
use crate::{error::TopoError, graph::Graph};

/// Available layout engines.
///
/// The names match external configuration strings (snake_case).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutEngine {
    /// Breadth-first layering with logistic spacing (default)
    #[default]
    Layered,
    /// Grid layering on an expanding table
    Block,
}

impl FromStr for LayoutEngine {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "layered" => Ok(Self::Layered),
            "block" => Ok(Self::Block),
            _ => Err("Unsupported layout engine"),
        }
    }
}

impl From<LayoutEngine> for &'static str {
    fn from(val: LayoutEngine) -> Self {
        match val {
            LayoutEngine::Layered => "layered",
            LayoutEngine::Block => "block",
        }
    }
}

impl Display for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Interface shared by the layout engines.
pub trait Engine {
    /// Calculate positions for every node reachable from the root.
    ///
    /// # Errors
    /// Returns `TopoError::Layout` if the engine cannot place a node.
    fn calculate(&self, graph: &Graph) -> Result<PositionMap, TopoError>;
}

/// Builder for creating and running layout engines.
#[derive(Debug, Default, Clone, Copy)]
pub struct EngineBuilder {
    require_connected: bool,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject graphs with nodes that cannot be reached from the root instead
    /// of leaving those nodes out.
    pub fn with_require_connected(mut self, require_connected: bool) -> Self {
        self.require_connected = require_connected;
        self
    }

    /// Returns the engine for `engine_type`.
    pub fn engine(&self, engine_type: LayoutEngine) -> Box<dyn Engine> {
        match engine_type {
            LayoutEngine::Layered => Box::new(LayerLayout::new()),
            LayoutEngine::Block => Box::new(BlockLayout::new()),
        }
    }

    /// Runs the selected engine on `graph`.
    ///
    /// # Errors
    ///
    /// Returns [`TopoError::InvalidGraph`] for unreachable nodes when
    /// connectivity is required, or the engine's own error.
    pub fn build(&self, graph: &Graph, engine_type: LayoutEngine) -> Result<PositionMap, TopoError> {
        let unreachable = graph.unreachable_nodes();
        if !unreachable.is_empty() {
            let names: Vec<&str> = unreachable.iter().map(|node| node.as_str()).collect();
            if self.require_connected {
                return Err(TopoError::InvalidGraph(format!(
                    "nodes unreachable from root `{}`: {}",
                    graph.root(),
                    names.join(", ")
                )));
            }
            warn!(
                count = names.len(),
                nodes:? = names;
                "Leaving out nodes unreachable from the root"
            );
        }

        info!(engine = engine_type.to_string(), nodes = graph.node_count(); "Calculating layout");
        self.engine(engine_type).calculate(graph)
    }
}


#[cfg(test)]
mod proptest_tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    /// Edge lists over a small node pool; the first edge always touches the
    /// root `n0`, the rest may form cycles, islands or self-loops.
    fn edge_list() -> impl Strategy<Value = Vec<(String, String)>> {
        (
            1usize..10,
            prop::collection::vec((0usize..10, 0usize..10), 0..24),
        )
            .prop_map(|(first, rest)| {
                std::iter::once((0, first))
                    .chain(rest)
                    .map(|(a, b)| (format!("n{a}"), format!("n{b}")))
                    .collect()
            })
    }

    fn assert_keys_match_reachable(graph: &Graph, positions: &PositionMap) -> Result<(), TestCaseError> {
        let keys: HashSet<&str> = positions.keys().map(|node| node.as_str()).collect();
        let reachable: HashSet<&str> = graph
            .reachable_from_root()
            .into_iter()
            .map(|node| node.as_str())
            .collect();

        prop_assert_eq!(keys.len(), positions.len());
        prop_assert_eq!(keys, reachable);
        prop_assert_eq!(positions.keys().next(), Some(graph.root()));
        Ok(())
    }

    proptest! {
        #[test]
        fn prop_layered_positions_every_reachable_node(edges in edge_list()) {
            let graph = Graph::build(edges, "n0").unwrap();

            let positions = EngineBuilder::new().build(&graph, LayoutEngine::Layered).unwrap();

            assert_keys_match_reachable(&graph, &positions)?;
        }

        #[test]
        fn prop_block_positions_every_reachable_node(edges in edge_list()) {
            let graph = Graph::build(edges, "n0").unwrap();

            // Out-of-table columns are a reported error, never a partial map
            match EngineBuilder::new().build(&graph, LayoutEngine::Block) {
                Ok(positions) => assert_keys_match_reachable(&graph, &positions)?,
                Err(err) => prop_assert!(matches!(err, TopoError::Layout(_))),
            }
        }
    }
}
