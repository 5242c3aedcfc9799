//! Errors raised while reading trace documents.

use std::io;

use thiserror::Error;

/// A location inside the trace document source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Byte offset from the start of the document.
    pub offset: usize,
    /// One-based line number.
    pub row: u32,
    /// One-based column number.
    pub col: u32,
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

/// Error type for the trace reader.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("malformed trace document at {location}: {message}")]
    Xml {
        message: String,
        location: SourceLocation,
    },

    #[error("unexpected root element `<{found}>`, expected `<networks>`")]
    UnexpectedRoot {
        found: String,
        location: SourceLocation,
    },

    #[error("`<{parent}>` at {location} has no `<{element}>`")]
    MissingElement {
        element: &'static str,
        parent: &'static str,
        location: SourceLocation,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl TraceError {
    /// Returns the document location the error points at, if any.
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            Self::Xml { location, .. }
            | Self::UnexpectedRoot { location, .. }
            | Self::MissingElement { location, .. } => Some(*location),
            Self::Io(_) => None,
        }
    }
}

impl TraceError {
    /// Converts an XML syntax error, resolving its position inside `source`.
    pub(crate) fn from_xml(source: &str, err: roxmltree::Error) -> Self {
        let pos = err.pos();
        Self::Xml {
            message: err.to_string(),
            location: SourceLocation {
                offset: offset_of(source, pos.row, pos.col),
                row: pos.row,
                col: pos.col,
            },
        }
    }
}

/// Resolves the byte offset of a one-based `row`/`col` pair in `source`.
///
/// Positions past the end of the source resolve to the source length.
pub(crate) fn offset_of(source: &str, row: u32, col: u32) -> usize {
    let mut offset = 0;
    for (index, line) in source.split_inclusive('\n').enumerate() {
        if index + 1 == row as usize {
            let column_bytes: usize = line
                .chars()
                .take(col.saturating_sub(1) as usize)
                .map(char::len_utf8)
                .sum();
            return offset + column_bytes;
        }
        offset += line.len();
    }
    source.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_of_first_line() {
        assert_eq!(offset_of("<a>\n<b>", 1, 1), 0);
        assert_eq!(offset_of("<a>\n<b>", 1, 3), 2);
    }

    #[test]
    fn test_offset_of_later_line() {
        assert_eq!(offset_of("<a>\n<b>", 2, 2), 5);
    }

    #[test]
    fn test_offset_of_past_end() {
        assert_eq!(offset_of("<a>", 7, 1), 3);
    }

    #[test]
    fn test_location_display() {
        let location = SourceLocation {
            offset: 10,
            row: 2,
            col: 5,
        };
        assert_eq!(location.to_string(), "2:5");
    }
}
