//! Node identifiers.
//!
//! A [`NodeId`] is an opaque, immutable string shared by reference count, so
//! that graphs, position maps and decoration maps can all key on the same
//! identifier without copying the underlying text.

use std::{borrow::Borrow, fmt, sync::Arc};

/// The reserved identifier for the implicit internet root of a trace.
pub const PUBLIC_ROOT: &str = "PUBLIC";

/// Opaque identifier of a node in a topology graph.
///
/// # Examples
///
/// ```
/// use topovis_core::identifier::NodeId;
///
/// let gateway = NodeId::new("10.0.0.1");
/// assert_eq!(gateway, "10.0.0.1");
/// assert_eq!(gateway.to_string(), "10.0.0.1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(Arc<str>);

impl NodeId {
    /// Creates a `NodeId` from its textual name.
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the reserved [`PUBLIC_ROOT`] identifier.
    pub fn is_public_root(&self) -> bool {
        &*self.0 == PUBLIC_ROOT
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for NodeId {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<&String> for NodeId {
    fn from(name: &String) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_node_id_equality_with_str() {
        let id = NodeId::new("core-sw1");
        assert_eq!(id, "core-sw1");
        assert_ne!(id, "core-sw2");
    }

    #[test]
    fn test_node_id_borrow_lookup() {
        let mut map = HashMap::new();
        map.insert(NodeId::new("10.0.0.1"), 7);
        assert_eq!(map.get("10.0.0.1"), Some(&7));
    }

    #[test]
    fn test_node_id_clones_share_text() {
        let id = NodeId::from(String::from("edge-router"));
        let clone = id.clone();
        assert!(std::ptr::eq(id.as_str(), clone.as_str()));
    }

    #[test]
    fn test_public_root() {
        assert!(NodeId::new(PUBLIC_ROOT).is_public_root());
        assert!(!NodeId::new("public").is_public_root());
    }
}
