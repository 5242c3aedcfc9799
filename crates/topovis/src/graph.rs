//! Undirected topology graph with a designated root.
//!
//! The graph is simple: duplicate edges are merged and self-loops are dropped.
//! Neighbor iteration follows edge insertion order so that every layout is
//! deterministic for a given input.

use std::collections::HashMap;

use log::{debug, trace};
use petgraph::{
    graph::{EdgeIndex, NodeIndex, UnGraph},
    visit::{Bfs, EdgeRef},
};

use topovis_core::identifier::NodeId;

use crate::error::TopoError;

/// An undirected topology graph rooted at one node.
#[derive(Debug, Clone)]
pub struct Graph {
    root: NodeId,
    graph: UnGraph<NodeId, ()>,
    indices: HashMap<NodeId, NodeIndex>,
}

impl Graph {
    /// Builds a graph from an edge list.
    ///
    /// # Errors
    ///
    /// Returns [`TopoError::InvalidGraph`] if the edge list is non-empty and
    /// `root` is not an endpoint of any edge.
    ///
    /// # Examples
    ///
    /// ```
    /// # use topovis::graph::Graph;
    /// let graph = Graph::build([("PUBLIC", "10.0.0.1"), ("10.0.0.1", "10.0.0.2")], "PUBLIC").unwrap();
    /// assert_eq!(graph.node_count(), 3);
    /// assert!(Graph::build([("a", "b")], "c").is_err());
    /// ```
    pub fn build<I, A, B>(edges: I, root: impl Into<NodeId>) -> Result<Self, TopoError>
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<NodeId>,
        B: Into<NodeId>,
    {
        let mut builder = GraphBuilder::new(root);
        for (source, target) in edges {
            builder.add_edge(source, target);
        }
        builder.build()
    }

    pub fn root(&self) -> &NodeId {
        &self.root
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, node: &str) -> bool {
        self.indices.contains_key(node)
    }

    /// Returns every node in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.graph.node_weights()
    }

    /// Returns every edge in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&NodeId, &NodeId)> {
        self.graph
            .edge_references()
            .map(|edge| (&self.graph[edge.source()], &self.graph[edge.target()]))
    }

    /// Returns the neighbors of `node` in the order their edges were added.
    ///
    /// Unknown nodes have no neighbors.
    pub fn neighbors(&self, node: &str) -> Vec<&NodeId> {
        let Some(&index) = self.indices.get(node) else {
            return Vec::new();
        };

        let mut incident: Vec<(EdgeIndex, NodeIndex)> = self
            .graph
            .edges(index)
            .map(|edge| {
                let other = if edge.source() == index {
                    edge.target()
                } else {
                    edge.source()
                };
                (edge.id(), other)
            })
            .collect();
        // petgraph walks the adjacency list newest first
        incident.sort_by_key(|(edge, _)| *edge);

        incident
            .into_iter()
            .map(|(_, other)| &self.graph[other])
            .collect()
    }

    /// Returns the nodes reachable from the root, root first.
    pub fn reachable_from_root(&self) -> Vec<&NodeId> {
        let Some(&start) = self.indices.get(&self.root) else {
            return Vec::new();
        };

        let mut bfs = Bfs::new(&self.graph, start);
        let mut reachable = Vec::with_capacity(self.graph.node_count());
        while let Some(index) = bfs.next(&self.graph) {
            reachable.push(&self.graph[index]);
        }
        reachable
    }

    /// Returns the nodes with no path to the root, in insertion order.
    pub fn unreachable_nodes(&self) -> Vec<&NodeId> {
        let reachable = self.reachable_from_root();
        if reachable.len() == self.graph.node_count() {
            return Vec::new();
        }

        self.nodes()
            .filter(|node| !reachable.contains(node))
            .collect()
    }
}

/// Incremental construction of a [`Graph`].
#[derive(Debug)]
pub struct GraphBuilder {
    root: NodeId,
    graph: UnGraph<NodeId, ()>,
    indices: HashMap<NodeId, NodeIndex>,
}

impl GraphBuilder {
    /// Starts a graph containing only `root`.
    pub fn new(root: impl Into<NodeId>) -> Self {
        let mut builder = Self {
            root: root.into(),
            graph: UnGraph::default(),
            indices: HashMap::new(),
        };
        let root = builder.root.clone();
        builder.add_node(root);
        builder
    }

    /// Adds a node without edges. Adding a known node is a no-op.
    pub fn add_node(&mut self, node: impl Into<NodeId>) -> &mut Self {
        self.index_of(node.into());
        self
    }

    /// Adds an undirected edge, creating missing endpoints.
    ///
    /// Self-loops and edges already present (in either direction) are ignored.
    pub fn add_edge(&mut self, source: impl Into<NodeId>, target: impl Into<NodeId>) -> &mut Self {
        let source = source.into();
        let target = target.into();

        if source == target {
            debug!(node = source.as_str(); "Ignoring self-loop");
            self.index_of(source);
            return self;
        }

        let source_index = self.index_of(source);
        let target_index = self.index_of(target);
        if self.graph.find_edge(source_index, target_index).is_some() {
            trace!(
                source = self.graph[source_index].as_str(),
                target = self.graph[target_index].as_str();
                "Merging duplicate edge"
            );
            return self;
        }

        self.graph.add_edge(source_index, target_index, ());
        self
    }

    /// Validates and finishes the graph.
    ///
    /// # Errors
    ///
    /// Returns [`TopoError::InvalidGraph`] if edges exist but none touches the
    /// root, or if there are no edges but more than one node.
    pub fn build(self) -> Result<Graph, TopoError> {
        let node_count = self.graph.node_count();
        let edge_count = self.graph.edge_count();

        if edge_count == 0 && node_count > 1 {
            return Err(TopoError::InvalidGraph(format!(
                "no edges connect the {node_count} nodes to root `{}`",
                self.root
            )));
        }

        let root_has_edge = self
            .indices
            .get(&self.root)
            .is_some_and(|&index| self.graph.edges(index).next().is_some());
        if edge_count > 0 && !root_has_edge {
            return Err(TopoError::InvalidGraph(format!(
                "root `{}` is not an endpoint of any edge",
                self.root
            )));
        }

        debug!(nodes = node_count, edges = edge_count; "Graph built");

        Ok(Graph {
            root: self.root,
            graph: self.graph,
            indices: self.indices,
        })
    }

    fn index_of(&mut self, node: NodeId) -> NodeIndex {
        if let Some(&index) = self.indices.get(&node) {
            return index;
        }
        let index = self.graph.add_node(node.clone());
        self.indices.insert(node, index);
        index
    }
}
