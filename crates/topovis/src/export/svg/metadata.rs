//! Document-level `<title>`, `<desc>` and `<metadata>` elements.

use svg::{
    Node as _,
    node::{Text as SvgText, element as svg_element},
};

use crate::diagram::Metadata;

const PROVENANCE: &str = "A graph of an IP network made with topovis";

/// Renders the document title.
pub fn title(title: &str) -> svg_element::Element {
    text_element("title", title)
}

/// Renders the fixed provenance description.
pub fn description() -> svg_element::Element {
    text_element("desc", PROVENANCE)
}

/// Renders one child element per metadata entry.
///
/// Keys become element names after [`xml_name`] sanitization; values are
/// escaped text content.
pub fn metadata(entries: &Metadata) -> svg_element::Element {
    let mut element = svg_element::Element::new("metadata");
    for (key, value) in entries {
        element.append(text_element(&xml_name(key), value));
    }
    element
}

fn text_element(name: &str, content: &str) -> svg_element::Element {
    let mut element = svg_element::Element::new(name);
    element.append(SvgText::new(content));
    element
}

/// Turns an arbitrary string into a valid XML element name.
///
/// Characters outside `[A-Za-z0-9._-]` become `_`, and a name that does not
/// start with a letter or `_` (including the reserved `xml` prefix) is
/// prefixed with `_`.
pub fn xml_name(key: &str) -> String {
    let mut name: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let starts_validly = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !starts_validly || name.to_ascii_lowercase().starts_with("xml") {
        name.insert(0, '_');
    }
    name
}
