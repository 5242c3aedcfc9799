//! Export functionality for topovis diagrams.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! converting a positioned diagram into an output format. It is the final
//! stage in the topovis processing pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Trace Document
//!     ↓ topovis-trace
//! Topology
//!     ↓ classify
//! Diagram
//!     ↓ layout
//! PositionMap
//!     ↓ export (this module)
//! SVG bytes
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] — SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`]. It converts into
//! [`TopoError::Render`](crate::TopoError::Render) at the crate boundary.

/// SVG export backend.
pub mod svg;

use std::io;

use thiserror::Error;

use topovis_core::identifier::NodeId;

use crate::{diagram::Diagram, layout::PositionMap};

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Exports a diagram whose reachable nodes have been positioned.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if `positions` and the diagram disagree, or if
    /// writing the output fails.
    fn export(&self, diagram: &Diagram, positions: &PositionMap) -> Result<Vec<u8>, Error>;
}

/// Errors that can occur during diagram export.
#[derive(Debug, Error)]
pub enum Error {
    /// A label, icon or type was given for a node that has no position.
    #[error("node `{node}` has a {attribute} but no position")]
    UnpositionedNode {
        node: NodeId,
        attribute: &'static str,
    },

    /// A position was given for a node that is not in the graph.
    #[error("node `{0}` has a position but is not part of the graph")]
    UnknownNode(NodeId),

    /// The root has no position.
    #[error("root node `{0}` has no position")]
    UnpositionedRoot(NodeId),

    /// An I/O error encountered while writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
