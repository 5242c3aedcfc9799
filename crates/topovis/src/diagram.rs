//! A topology graph with everything needed to draw it.

use indexmap::IndexMap;
use log::debug;

use topovis_core::identifier::NodeId;
use topovis_trace::Topology;

use crate::{
    classify::Classifier,
    error::TopoError,
    graph::{Graph, GraphBuilder},
};

/// Caller-supplied key/value pairs embedded in the SVG `<metadata>`.
pub type Metadata = IndexMap<String, String>;

/// Per-node labels, icon references and semantic types.
#[derive(Debug, Clone, Default)]
pub struct NodeDecorations {
    labels: IndexMap<NodeId, String>,
    icons: IndexMap<NodeId, String>,
    types: IndexMap<NodeId, String>,
}

impl NodeDecorations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_label(&mut self, node: impl Into<NodeId>, label: impl Into<String>) {
        self.labels.insert(node.into(), label.into());
    }

    pub fn set_icon(&mut self, node: impl Into<NodeId>, icon: impl Into<String>) {
        self.icons.insert(node.into(), icon.into());
    }

    pub fn set_type(&mut self, node: impl Into<NodeId>, kind: impl Into<String>) {
        self.types.insert(node.into(), kind.into());
    }

    pub fn label(&self, node: &str) -> Option<&str> {
        self.labels.get(node).map(String::as_str)
    }

    pub fn icon(&self, node: &str) -> Option<&str> {
        self.icons.get(node).map(String::as_str)
    }

    pub fn node_type(&self, node: &str) -> Option<&str> {
        self.types.get(node).map(String::as_str)
    }

    pub fn labels(&self) -> &IndexMap<NodeId, String> {
        &self.labels
    }

    pub fn icons(&self) -> &IndexMap<NodeId, String> {
        &self.icons
    }

    pub fn types(&self) -> &IndexMap<NodeId, String> {
        &self.types
    }

    /// Iterates over every decorated node together with the attribute it
    /// carries (`"label"`, `"icon"` or `"type"`).
    pub fn keys(&self) -> impl Iterator<Item = (&NodeId, &'static str)> {
        self.labels
            .keys()
            .map(|node| (node, "label"))
            .chain(self.icons.keys().map(|node| (node, "icon")))
            .chain(self.types.keys().map(|node| (node, "type")))
    }

    /// Fills in the icon and type of every node in `nodes` that has none yet.
    ///
    /// A node is classified by the first line of its label (the host name)
    /// when it has one, and by its identifier otherwise.
    pub fn classify<'a>(
        &mut self,
        nodes: impl IntoIterator<Item = &'a NodeId>,
        classifier: &dyn Classifier,
    ) {
        for node in nodes {
            if self.icons.contains_key(node) && self.types.contains_key(node) {
                continue;
            }

            let name = self
                .labels
                .get(node)
                .and_then(|label| label.lines().next())
                .filter(|line| !line.is_empty())
                .unwrap_or(node.as_str());
            let classification = classifier.classify(name);
            debug!(
                node = node.as_str(),
                icon = classification.icon,
                kind = classification.kind;
                "Node classified"
            );

            self.icons
                .entry(node.clone())
                .or_insert(classification.icon);
            self.types
                .entry(node.clone())
                .or_insert(classification.kind);
        }
    }
}

/// A graph ready for layout and rendering.
#[derive(Debug, Clone)]
pub struct Diagram {
    title: String,
    graph: Graph,
    decorations: NodeDecorations,
    metadata: Metadata,
}

impl Diagram {
    pub fn new(title: impl Into<String>, graph: Graph) -> Self {
        Self {
            title: title.into(),
            graph,
            decorations: NodeDecorations::default(),
            metadata: Metadata::default(),
        }
    }

    /// Builds the diagram of one traced network, classifying every node.
    ///
    /// # Errors
    ///
    /// Returns [`TopoError::InvalidGraph`] if the trace edges do not form a
    /// valid graph.
    pub fn from_topology(topology: Topology, classifier: &dyn Classifier) -> Result<Self, TopoError> {
        let title = topology.title();
        let (root, edges, labels) = topology.into_parts();

        let mut builder = GraphBuilder::new(root);
        for (source, target) in edges {
            builder.add_edge(source, target);
        }
        let graph = builder.build()?;

        let mut decorations = NodeDecorations::new();
        for (node, label) in labels {
            decorations.set_label(node, label);
        }
        decorations.classify(graph.nodes(), classifier);

        Ok(Self::new(title, graph).with_decorations(decorations))
    }

    pub fn with_decorations(mut self, decorations: NodeDecorations) -> Self {
        self.decorations = decorations;
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn decorations(&self) -> &NodeDecorations {
        &self.decorations
    }

    pub fn decorations_mut(&mut self) -> &mut NodeDecorations {
        &mut self.decorations
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        classify::{Classification, PatternClassifier},
        config::ClassifyConfig,
    };
    use topovis_trace::TraceNode;

    struct Fixed;

    impl Classifier for Fixed {
        fn classify(&self, node: &str) -> Classification {
            Classification::new(format!("{node}.svg"), "fixed")
        }
    }

    #[test]
    fn test_classify_uses_first_label_line() {
        let graph = Graph::build([("r", "10.0.0.1")], "r").unwrap();
        let mut decorations = NodeDecorations::new();
        decorations.set_label("10.0.0.1", "gw.lab.example\n10.0.0.1");

        decorations.classify(graph.nodes(), &Fixed);

        assert_eq!(decorations.icon("10.0.0.1"), Some("gw.lab.example.svg"));
        assert_eq!(decorations.icon("r"), Some("r.svg"));
    }

    #[test]
    fn test_classify_keeps_existing_decorations() {
        let graph = Graph::build([("r", "a")], "r").unwrap();
        let mut decorations = NodeDecorations::new();
        decorations.set_icon("a", "custom.svg");

        decorations.classify(graph.nodes(), &Fixed);

        assert_eq!(decorations.icon("a"), Some("custom.svg"));
        assert_eq!(decorations.node_type("a"), Some("fixed"));
    }

    #[test]
    fn test_keys_name_their_attribute() {
        let mut decorations = NodeDecorations::new();
        decorations.set_label("a", "A");
        decorations.set_type("b", "misc");

        let keys: Vec<(&str, &str)> = decorations
            .keys()
            .map(|(node, attribute)| (node.as_str(), attribute))
            .collect();
        assert_eq!(keys, [("a", "label"), ("b", "type")]);
    }

    #[test]
    fn test_from_topology() {
        let mut topology = Topology::new("Lab");
        topology.add_trace(
            &[TraceNode::new("10.0.0.1", Some("fw1.lab.example".to_string()))],
            &TraceNode::new("10.0.1.5", None),
        );
        let classifier = PatternClassifier::new(&ClassifyConfig::default()).unwrap();

        let diagram = Diagram::from_topology(topology, &classifier).unwrap();

        assert_eq!(diagram.title(), "Lab Network");
        assert_eq!(diagram.graph().edge_count(), 2);
        let decorations = diagram.decorations();
        assert_eq!(decorations.node_type("PUBLIC"), Some("not-a-host"));
        assert_eq!(decorations.node_type("10.0.0.1"), Some("firewall"));
        assert_eq!(decorations.icon("10.0.1.5"), Some("osa_server.svg"));
    }
}
