//! Per-network topologies built from trace documents.

use indexmap::IndexMap;

use topovis_core::identifier::{NodeId, PUBLIC_ROOT};

/// The topology of a single traced network.
///
/// Every trace starts at the shared [`PUBLIC_ROOT`] node. Node identifiers
/// are addresses; labels carry the hostname (when known) above the address.
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    name: String,
    root: NodeId,
    edges: Vec<(NodeId, NodeId)>,
    labels: IndexMap<NodeId, String>,
}

impl Topology {
    /// Creates an empty topology rooted at [`PUBLIC_ROOT`].
    pub fn new(name: impl Into<String>) -> Self {
        let root = NodeId::new(PUBLIC_ROOT);
        let mut labels = IndexMap::new();
        labels.insert(root.clone(), PUBLIC_ROOT.to_string());

        Self {
            name: name.into(),
            root,
            edges: Vec::new(),
            labels,
        }
    }

    /// Adds the edge chain of one traced host: root, then every hop, then the host.
    pub fn add_trace(&mut self, hops: &[TraceNode], host: &TraceNode) {
        let mut last = self.root.clone();
        for node in hops.iter().chain(std::iter::once(host)) {
            let id = NodeId::new(&node.address);
            self.edges.push((last, id.clone()));
            self.labels.insert(id.clone(), node.label());
            last = id;
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the diagram title used for this network.
    pub fn title(&self) -> String {
        format!("{} Network", self.name)
    }

    pub fn root(&self) -> &NodeId {
        &self.root
    }

    /// Returns the edges in trace order. Repeated hops produce repeated edges.
    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    pub fn labels(&self) -> &IndexMap<NodeId, String> {
        &self.labels
    }

    /// Consumes the topology, returning its root, edges and labels.
    pub fn into_parts(self) -> (NodeId, Vec<(NodeId, NodeId)>, IndexMap<NodeId, String>) {
        (self.root, self.edges, self.labels)
    }
}

/// A host or hop of a trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceNode {
    pub address: String,
    pub hostname: Option<String>,
}

impl TraceNode {
    pub fn new(address: impl Into<String>, hostname: Option<String>) -> Self {
        Self {
            address: address.into(),
            hostname,
        }
    }

    /// Returns `hostname\naddress`, or the bare address when the hostname is
    /// unknown or is the address itself.
    pub fn label(&self) -> String {
        match &self.hostname {
            Some(hostname) if hostname != &self.address => {
                format!("{hostname}\n{}", self.address)
            }
            _ => self.address.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_topology_has_public_root() {
        let topology = Topology::new("Lab");

        assert!(topology.root().is_public_root());
        assert_eq!(topology.labels()[topology.root()], "PUBLIC");
        assert!(topology.edges().is_empty());
        assert_eq!(topology.title(), "Lab Network");
    }

    #[test]
    fn test_add_trace_builds_chain() {
        let mut topology = Topology::new("Lab");
        let hops = [
            TraceNode::new("10.0.0.1", Some("gw.lab.example".to_string())),
            TraceNode::new("10.0.1.1", None),
        ];
        let host = TraceNode::new("10.0.1.20", Some("db.lab.example".to_string()));

        topology.add_trace(&hops, &host);

        let edges: Vec<(&str, &str)> = topology
            .edges()
            .iter()
            .map(|(a, b)| (a.as_str(), b.as_str()))
            .collect();
        assert_eq!(
            edges,
            [
                ("PUBLIC", "10.0.0.1"),
                ("10.0.0.1", "10.0.1.1"),
                ("10.0.1.1", "10.0.1.20"),
            ]
        );
        assert_eq!(topology.labels()["10.0.0.1"], "gw.lab.example\n10.0.0.1");
        assert_eq!(topology.labels()["10.0.1.1"], "10.0.1.1");
    }

    #[test]
    fn test_label_hostname_equal_to_address() {
        let node = TraceNode::new("10.0.0.1", Some("10.0.0.1".to_string()));
        assert_eq!(node.label(), "10.0.0.1");
    }
}
