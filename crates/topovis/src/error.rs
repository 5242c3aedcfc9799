//! Error types for topovis operations.
//!
//! This module provides the main error type [`TopoError`] which wraps the
//! failures of every pipeline stage, from reading a trace document to
//! rendering the SVG.

use std::io;

use thiserror::Error;

use topovis_trace::TraceError;

/// The main error type for topovis operations.
///
/// # Recovery
///
/// - [`TopoError::InvalidGraph`] is final for the graph it was raised for.
/// - [`TopoError::Layout`] is raised by the block layout when a node falls
///   outside the table; callers may retry with the layered layout.
/// - [`TopoError::Render`] means the maps handed to the renderer disagree
///   with each other and is never masked.
#[derive(Debug, Error)]
pub enum TopoError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid graph: {0}")]
    InvalidGraph(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Render error: {0}")]
    Render(#[from] crate::export::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A trace document could not be read; `src` holds the document text so
    /// the error location can be shown in context.
    #[error("{err}")]
    Trace { err: TraceError, src: String },
}

impl TopoError {
    /// Create a new `Trace` error with the associated document source.
    pub fn new_trace_error(err: TraceError, src: impl Into<String>) -> Self {
        Self::Trace {
            err,
            src: src.into(),
        }
    }
}
