//! Error adapter for converting TopoError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Trace document
//! errors point into the document source; every other error is reported
//! without a snippet.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use topovis::TopoError;
use topovis_trace::TraceError;

/// Adapter for a trace document error together with the document source.
pub struct TraceAdapter<'a> {
    err: &'a TraceError,
    src: &'a str,
}

impl<'a> TraceAdapter<'a> {
    pub fn new(err: &'a TraceError, src: &'a str) -> Self {
        Self { err, src }
    }
}

impl fmt::Debug for TraceAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for TraceAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.err, f)
    }
}

impl std::error::Error for TraceAdapter<'_> {}

impl MietteDiagnostic for TraceAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("topovis::trace"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.err {
            TraceError::UnexpectedRoot { .. } => "trace documents start with a <networks> element",
            TraceError::MissingElement { .. } => "every network needs a <networkname>, and every host and hop an <address>",
            TraceError::Xml { .. } | TraceError::Io(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let location = self.err.location()?;
        let span = SourceSpan::new(location.offset.min(self.src.len()).into(), 0);
        let label = LabeledSpan::new_primary_with_span(Some("here".to_string()), span);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for [`TopoError`] variants without a source location.
pub struct ErrorAdapter<'a>(pub &'a TopoError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            TopoError::Io(_) => "topovis::io",
            TopoError::InvalidGraph(_) => "topovis::graph",
            TopoError::Layout(_) => "topovis::layout",
            TopoError::Render(_) => "topovis::render",
            TopoError::Config(_) => "topovis::config",
            TopoError::Trace { .. } => "topovis::trace",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            TopoError::Layout(_) => Some(Box::new(
                "the layered layout places any graph; set `layout.fallback_to_layered = true` or pass `--layout layered`",
            )),
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A trace document error with its source location.
    Trace(TraceAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Trace(t) => fmt::Display::fmt(t, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Trace(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Trace(t) => t.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Trace(t) => t.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Trace(t) => t.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Trace(t) => t.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`TopoError`] into a list of reportable errors.
pub fn to_reportables(err: &TopoError) -> Vec<Reportable<'_>> {
    match err {
        TopoError::Trace { err, src } => vec![Reportable::Trace(TraceAdapter::new(err, src))],
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

/// Renders `err` with miette's graphical handler, one string per report.
pub fn render_reports(err: &TopoError) -> Vec<String> {
    let reporter = miette::GraphicalReportHandler::new();

    to_reportables(err)
        .iter()
        .map(|reportable| {
            let mut writer = String::new();
            reporter
                .render_report(&mut writer, reportable)
                .expect("Writing to String buffer is infallible");
            writer
        })
        .collect()
}
