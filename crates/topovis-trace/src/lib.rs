//! Traceroute documents for topovis.
//!
//! A trace document lists, per network, the hosts that were traced and the
//! hops leading to each one. [`parse_str`] turns every traced network into a
//! [`Topology`] rooted at the shared `PUBLIC` node, ready to be laid out and
//! rendered by the `topovis` crate.
//!
//! # Example
//!
//! ```
//! let source = r#"
//! <networks>
//!   <network>
//!     <networkname>Lab</networkname>
//!     <hosts>
//!       <host>
//!         <address>10.0.1.20</address>
//!         <trace><hop><address>10.0.0.1</address></hop></trace>
//!       </host>
//!     </hosts>
//!   </network>
//! </networks>"#;
//!
//! let topologies = topovis_trace::parse_str(source).unwrap();
//! assert_eq!(topologies[0].name(), "Lab");
//! assert_eq!(topologies[0].edges().len(), 2);
//! ```

mod document;
pub mod error;
mod topology;

use std::io::Read;

pub use error::{SourceLocation, TraceError};
pub use topology::{Topology, TraceNode};

/// Parses a trace document held in memory.
pub fn parse_str(source: &str) -> Result<Vec<Topology>, TraceError> {
    document::parse_document(source)
}

/// Reads a complete trace document from `reader` and parses it.
pub fn parse_reader<R: Read>(mut reader: R) -> Result<Vec<Topology>, TraceError> {
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    parse_str(&source)
}
