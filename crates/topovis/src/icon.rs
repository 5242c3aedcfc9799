//! Icon assets supplied by the caller.
//!
//! The renderer never reads files; whoever drives it loads the SVG source of
//! each icon reference into an [`IconLibrary`] up front.

use std::collections::HashMap;

use roxmltree::Document;
use thiserror::Error;

/// An icon asset that cannot be embedded.
#[derive(Debug, Error)]
#[error("icon asset `{reference}` is not well-formed XML: {source}")]
pub struct IconError {
    reference: String,
    #[source]
    source: roxmltree::Error,
}

impl IconError {
    pub fn reference(&self) -> &str {
        &self.reference
    }
}

/// Icon reference → SVG asset source.
#[derive(Debug, Clone, Default)]
pub struct IconLibrary {
    assets: HashMap<String, String>,
}

impl IconLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the asset for `reference`, replacing any previous one.
    ///
    /// Only the root element is kept, so the XML declaration, doctype and
    /// surrounding comments never end up inside another document.
    ///
    /// # Errors
    ///
    /// Returns [`IconError`] if `source` is not a well-formed XML document;
    /// the library is left unchanged.
    pub fn insert(&mut self, reference: impl Into<String>, source: &str) -> Result<(), IconError> {
        let reference = reference.into();
        let root = match Document::parse(source) {
            Ok(document) => document.root_element().range(),
            Err(err) => return Err(IconError { reference, source: err }),
        };

        self.assets.insert(reference, source[root].to_string());
        Ok(())
    }

    /// Returns the embeddable asset for `reference`, if one was loaded.
    pub fn get(&self, reference: &str) -> Option<&str> {
        self.assets.get(reference).map(String::as_str)
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.assets.contains_key(reference)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_root_element_only() {
        let source = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- Generator: vector editor -->
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<svg xmlns="http://www.w3.org/2000/svg"><rect/></svg>
<!-- trailing -->
"#;
        let mut library = IconLibrary::new();
        library.insert("osa_server.svg", source).unwrap();

        assert_eq!(
            library.get("osa_server.svg"),
            Some(r#"<svg xmlns="http://www.w3.org/2000/svg"><rect/></svg>"#)
        );
    }

    #[test]
    fn test_insert_internal_subset() {
        let mut library = IconLibrary::new();
        library
            .insert("a.svg", "<!DOCTYPE svg [ <!ENTITY a \"b\"> ]><svg/>")
            .unwrap();

        assert_eq!(library.get("a.svg"), Some("<svg/>"));
    }

    #[test]
    fn test_malformed_asset_is_rejected() {
        let mut library = IconLibrary::new();

        let err = library.insert("broken.svg", "<svg><g></svg>").unwrap_err();

        assert_eq!(err.reference(), "broken.svg");
        assert!(err.to_string().contains("broken.svg"));
        assert!(library.is_empty());
    }

    #[test]
    fn test_library_lookup() {
        let mut library = IconLibrary::new();
        library
            .insert("osa_server.svg", "<?xml version=\"1.0\"?><svg/>")
            .unwrap();

        assert_eq!(library.get("osa_server.svg"), Some("<svg/>"));
        assert!(library.get("osa_cloud.svg").is_none());
        assert!(library.contains("osa_server.svg"));
        assert_eq!(library.len(), 1);
    }
}
