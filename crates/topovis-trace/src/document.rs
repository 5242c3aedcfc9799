//! Reading the `<networks>` trace document.
//!
//! ```xml
//! <networks>
//!   <network>
//!     <networkname>Lab</networkname>
//!     <hosts>
//!       <host>
//!         <address>10.0.1.20</address>
//!         <hostname>db.lab.example</hostname>
//!         <trace>
//!           <hop><address>10.0.0.1</address><hostname>gw.lab.example</hostname></hop>
//!         </trace>
//!       </host>
//!     </hosts>
//!   </network>
//! </networks>
//! ```

use log::{debug, info};
use roxmltree::{Document, Node};

use crate::{
    error::{SourceLocation, TraceError},
    topology::{Topology, TraceNode},
};

type Result<T> = std::result::Result<T, TraceError>;

/// Parses a trace document into one [`Topology`] per traced network.
///
/// Networks without a `<hosts>` section (or with an empty one) are skipped,
/// as are hosts without a `<trace>`.
pub fn parse_document(source: &str) -> Result<Vec<Topology>> {
    let document = Document::parse(source).map_err(|err| TraceError::from_xml(source, err))?;
    let reader = Reader {
        document: &document,
    };

    let root = document.root_element();
    if !root.has_tag_name("networks") {
        return Err(TraceError::UnexpectedRoot {
            found: root.tag_name().name().to_string(),
            location: reader.location(root),
        });
    }

    let mut topologies = Vec::new();
    for network in elements(root, "network") {
        if let Some(topology) = reader.network(network)? {
            topologies.push(topology);
        }
    }

    info!(networks = topologies.len(); "Trace document parsed");
    Ok(topologies)
}

struct Reader<'a, 'input> {
    document: &'a Document<'input>,
}

impl<'a, 'input> Reader<'a, 'input> {
    fn network(&self, network: Node<'a, 'input>) -> Result<Option<Topology>> {
        let name = self.required_text(network, "networkname", "network")?;

        let hosts: Vec<_> = child(network, "hosts")
            .map(|hosts| elements(hosts, "host").collect())
            .unwrap_or_default();
        if hosts.is_empty() {
            debug!(network = name; "Skipping network without hosts");
            return Ok(None);
        }

        let mut topology = Topology::new(name);
        for host in hosts {
            let host_node = self.trace_node(host, "host")?;
            let Some(trace) = child(host, "trace") else {
                debug!(network = name, host = host_node.address; "Skipping host without trace");
                continue;
            };

            let hops = elements(trace, "hop")
                .map(|hop| self.trace_node(hop, "hop"))
                .collect::<Result<Vec<_>>>()?;
            topology.add_trace(&hops, &host_node);
        }

        Ok(Some(topology))
    }

    fn trace_node(&self, node: Node<'a, 'input>, parent: &'static str) -> Result<TraceNode> {
        let address = self.required_text(node, "address", parent)?;
        let hostname = child(node, "hostname")
            .and_then(text)
            .map(str::to_string);
        Ok(TraceNode::new(address, hostname))
    }

    fn required_text(
        &self,
        node: Node<'a, 'input>,
        element: &'static str,
        parent: &'static str,
    ) -> Result<&'a str> {
        child(node, element)
            .and_then(text)
            .ok_or_else(|| TraceError::MissingElement {
                element,
                parent,
                location: self.location(node),
            })
    }

    fn location(&self, node: Node<'_, '_>) -> SourceLocation {
        let offset = node.range().start;
        let pos = self.document.text_pos_at(offset);
        SourceLocation {
            offset,
            row: pos.row,
            col: pos.col,
        }
    }
}

fn elements<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && child.has_tag_name(name))
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &'static str) -> Option<Node<'a, 'input>> {
    elements(node, name).next()
}

/// Returns the trimmed text of an element, or `None` when it is blank.
fn text<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.text().map(str::trim).filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAB: &str = r#"<?xml version="1.0"?>
<networks>
  <network>
    <networkname>Lab</networkname>
    <hosts>
      <host>
        <address>10.0.1.20</address>
        <hostname>db.lab.example</hostname>
        <trace>
          <hop><address>10.0.0.1</address><hostname>gw.lab.example</hostname></hop>
          <hop><address>10.0.1.1</address></hop>
        </trace>
      </host>
      <host>
        <address>10.0.1.21</address>
        <trace>
          <hop><address>10.0.0.1</address><hostname>gw.lab.example</hostname></hop>
          <hop><address>10.0.1.1</address><hostname/></hop>
        </trace>
      </host>
      <host>
        <address>10.0.1.99</address>
      </host>
    </hosts>
  </network>
  <network>
    <networkname>Empty</networkname>
    <hosts/>
  </network>
</networks>
"#;

    #[test]
    fn test_parse_document_networks() {
        let topologies = parse_document(LAB).unwrap();

        assert_eq!(topologies.len(), 1);
        let lab = &topologies[0];
        assert_eq!(lab.name(), "Lab");
        assert_eq!(lab.edges().len(), 6);
        assert_eq!(lab.labels()["10.0.1.20"], "db.lab.example\n10.0.1.20");
        assert_eq!(lab.labels()["10.0.1.21"], "10.0.1.21");
        assert!(!lab.labels().contains_key("10.0.1.99"));
    }

    #[test]
    fn test_parse_document_labels_follow_first_seen_order() {
        let topologies = parse_document(LAB).unwrap();
        let ids: Vec<&str> = topologies[0].labels().keys().map(|id| id.as_str()).collect();
        assert_eq!(
            ids,
            ["PUBLIC", "10.0.0.1", "10.0.1.1", "10.0.1.20", "10.0.1.21"]
        );
    }

    #[test]
    fn test_parse_document_malformed_xml() {
        let err = parse_document("<networks>\n  <network>\n</networks>").unwrap_err();

        let TraceError::Xml { location, .. } = err else {
            panic!("expected an XML error, got {err:?}");
        };
        assert_eq!(location.row, 3);
        assert!(location.offset > 0);
    }

    #[test]
    fn test_parse_document_wrong_root() {
        let err = parse_document("<hosts/>").unwrap_err();
        assert!(matches!(err, TraceError::UnexpectedRoot { ref found, .. } if found == "hosts"));
    }

    #[test]
    fn test_parse_document_missing_address() {
        let source = "<networks><network><networkname>N</networkname><hosts>\n<host><trace/></host></hosts></network></networks>";
        let err = parse_document(source).unwrap_err();

        let TraceError::MissingElement {
            element,
            parent,
            location,
        } = err
        else {
            panic!("expected a missing element error, got {err:?}");
        };
        assert_eq!(element, "address");
        assert_eq!(parent, "host");
        assert_eq!(location.row, 2);
        assert_eq!(&source[location.offset..location.offset + 5], "<host");
    }

    #[test]
    fn test_parse_document_missing_network_name() {
        let err = parse_document("<networks><network/></networks>").unwrap_err();
        assert!(matches!(
            err,
            TraceError::MissingElement {
                element: "networkname",
                ..
            }
        ));
    }

    #[test]
    fn test_parse_document_hosts_without_traces_keep_root() {
        let source = "<networks><network><networkname>Quiet</networkname><hosts><host><address>10.9.9.9</address></host></hosts></network></networks>";
        let topologies = parse_document(source).unwrap();

        assert_eq!(topologies.len(), 1);
        assert!(topologies[0].edges().is_empty());
        assert_eq!(topologies[0].labels().len(), 1);
    }
}
