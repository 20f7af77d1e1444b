//! Dotted-path access.
//!
//! A key containing [`PATH_SEPARATOR`] is split at the first separator into
//! a head segment and the rest of the path; the head is looked up literally
//! and the rest is resolved against the child node. A key without a
//! separator (including the empty key) is plain literal access.
//!
//! Empty segments are ordinary literal keys: `"a."` addresses the key `""`
//! inside `a`.

use tracing::trace;

use crate::PATH_SEPARATOR;
use crate::node::ConfigNode;
use crate::types::Slot;

/// Split a path at its first separator. `None` means the path is a single
/// literal key.
fn split_path(path: &str) -> Option<(&str, &str)> {
    path.split_once(PATH_SEPARATOR)
}

impl ConfigNode {
    /// Check if a path resolves to a slot.
    ///
    /// Descending through a scalar counts as not found.
    pub fn has(&self, path: &str) -> bool {
        match split_path(path) {
            None => self.contains_key(path),
            Some((head, rest)) => match self.get_key(head) {
                Some(Slot::Nested(child)) => child.has(rest),
                _ => false,
            },
        }
    }

    /// Resolve a path to its slot.
    ///
    /// A path ending on a nested slot yields the child node itself, not its
    /// export. Returns `None` when any segment is missing or when the path
    /// tries to descend through a scalar.
    pub fn get(&self, path: &str) -> Option<&Slot> {
        match split_path(path) {
            None => self.get_key(path),
            Some((head, rest)) => self.get_key(head)?.as_node()?.get(rest),
        }
    }

    /// Resolve a path, returning `fallback` when it does not resolve.
    pub fn get_or<'a>(&'a self, path: &str, fallback: &'a Slot) -> &'a Slot {
        self.get(path).unwrap_or(fallback)
    }

    pub fn get_mut(&mut self, path: &str) -> Option<&mut Slot> {
        match split_path(path) {
            None => self.get_key_mut(path),
            Some((head, rest)) => self.get_key_mut(head)?.as_node_mut()?.get_mut(rest),
        }
    }

    /// Resolve a path to a child node.
    pub fn node(&self, path: &str) -> Option<&ConfigNode> {
        self.get(path)?.as_node()
    }

    /// Store a value at a path.
    ///
    /// Missing intermediate segments are created as empty nodes, and an
    /// intermediate scalar is replaced by an empty node. The final segment is
    /// assigned like [`ConfigNode::insert`], including normalization.
    pub fn set(&mut self, path: &str, value: impl Into<Slot>) {
        match split_path(path) {
            None => {
                self.insert(path, value);
            }
            Some((head, rest)) => match self.get_key_mut(head) {
                Some(Slot::Nested(child)) => child.set(rest, value),
                existing => {
                    match existing {
                        Some(Slot::Scalar(scalar)) => {
                            trace!(key = head, replaced = %scalar, "Replacing scalar with intermediate node");
                        }
                        _ => trace!(key = head, "Creating intermediate node"),
                    }
                    let mut child = ConfigNode::new();
                    child.set(rest, value);
                    self.insert(head, child);
                }
            },
        }
    }

    /// Remove the slot at a path, returning it.
    ///
    /// Missing segments and attempts to descend through a scalar are no-ops.
    pub fn remove(&mut self, path: &str) -> Option<Slot> {
        match split_path(path) {
            None => self.remove_key(path),
            Some((head, rest)) => self.get_key_mut(head)?.as_node_mut()?.remove(rest),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Scalar, Value};
    use indexmap::IndexMap;

    fn sample() -> ConfigNode {
        let mut config = ConfigNode::new();
        config.set("a.b.c", 1);
        config.set("a.b.d", "two");
        config.set("a.e", true);
        config.set("top", "scalar");
        config
    }

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("a"), None);
        assert_eq!(split_path(""), None);
        assert_eq!(split_path("a.b.c"), Some(("a", "b.c")));
        assert_eq!(split_path("a."), Some(("a", "")));
        assert_eq!(split_path(".a"), Some(("", "a")));
    }

    #[test]
    fn test_has_path() {
        let config = sample();
        assert!(config.has("a"));
        assert!(config.has("a.b"));
        assert!(config.has("a.b.c"));
        assert!(!config.has("a.b.missing"));
        assert!(!config.has("missing.b"));
    }

    #[test]
    fn test_has_through_scalar_is_false() {
        let config = sample();
        assert!(!config.has("top.x"));
        assert!(!config.has("a.b.c.deeper"));
    }

    #[test]
    fn test_get_path() {
        let config = sample();
        assert_eq!(config.get("a.b.c").and_then(Slot::as_i64), Some(1));
        assert_eq!(config.get("a.b.d").and_then(Slot::as_str), Some("two"));
        assert_eq!(config.get("a.e").and_then(Slot::as_bool), Some(true));
    }

    #[test]
    fn test_get_path_ending_on_node_returns_node() {
        let config = sample();
        let b = config.get("a.b").and_then(Slot::as_node).unwrap();
        assert_eq!(b.len(), 2);
        assert_eq!(config.node("a.b"), Some(b));
    }

    #[test]
    fn test_get_or_fallback() {
        let config = sample();
        let fallback = Slot::from("fallback");
        assert_eq!(config.get_or("missing", &fallback), &fallback);
        assert_eq!(config.get_or("a.missing", &fallback), &fallback);
        assert_eq!(config.get_or("top.x", &fallback), &fallback);
        assert_eq!(config.get_or("a.e", &fallback), &Slot::from(true));
    }

    #[test]
    fn test_get_distinguishes_stored_null() {
        let mut config = ConfigNode::new();
        config.set("a.nothing", Scalar::Null);
        assert_eq!(config.get("a.nothing"), Some(&Slot::null()));
        assert_eq!(config.get("a.absent"), None);
    }

    #[test]
    fn test_get_mut_path() {
        let mut config = sample();
        if let Some(slot) = config.get_mut("a.b.c") {
            *slot = Slot::from(99);
        }
        assert_eq!(config.get("a.b.c").and_then(Slot::as_i64), Some(99));
        assert!(config.get_mut("top.x").is_none());
    }

    #[test]
    fn test_set_auto_vivifies() {
        let mut config = ConfigNode::new();
        config.set("x.y.z", 5);

        assert!(config.has("x"));
        assert!(config.has("x.y"));
        assert_eq!(config.get("x.y.z").and_then(Slot::as_i64), Some(5));
        assert!(config.get("x").unwrap().is_nested());
    }

    #[test]
    fn test_set_through_existing_node_keeps_siblings() {
        let mut config = sample();
        config.set("a.b.f", 3);

        let keys: Vec<&str> = config.node("a.b").unwrap().keys().collect();
        assert_eq!(keys, vec!["c", "d", "f"]);
        assert_eq!(config.get("a.e").and_then(Slot::as_bool), Some(true));
    }

    #[test]
    fn test_set_replaces_intermediate_scalar() {
        let mut config = sample();
        config.set("top.inner", 1);
        assert!(config.get("top").unwrap().is_nested());
        assert_eq!(config.get("top.inner").and_then(Slot::as_i64), Some(1));
    }

    #[test]
    fn test_set_replaces_subtree_with_scalar() {
        let mut config = sample();
        config.set("a.b", "flat");
        assert_eq!(config.get("a.b").and_then(Slot::as_str), Some("flat"));
        assert!(!config.has("a.b.c"));
    }

    #[test]
    fn test_set_normalizes_terminal_value() {
        let mut entries = IndexMap::new();
        entries.insert("port".to_string(), Value::from(5432));

        let mut config = ConfigNode::new();
        config.set("app.db", Value::Mapping(entries));
        assert_eq!(config.get("app.db.port").and_then(Slot::as_i64), Some(5432));
    }

    #[test]
    fn test_remove_subtree() {
        let mut config = sample();
        let removed = config.remove("a.b");
        assert!(removed.unwrap().is_nested());
        assert!(!config.has("a.b"));
        assert!(config.has("a"));
        assert!(config.has("a.e"));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut config = sample();
        let before = config.clone();
        assert_eq!(config.remove("a.missing"), None);
        assert_eq!(config.remove("missing.x"), None);
        assert_eq!(config.remove("top.x"), None);
        assert_eq!(config, before);
    }

    #[test]
    fn test_empty_key_is_literal() {
        let mut config = ConfigNode::new();
        config.set("", "empty");
        assert!(config.contains_key(""));
        assert_eq!(config.get("").and_then(Slot::as_str), Some("empty"));
    }

    #[test]
    fn test_empty_segments_are_keys() {
        let mut config = ConfigNode::new();
        config.set("a.", 1);
        config.set(".b", 2);

        let a = config.node("a").unwrap();
        assert_eq!(a.get_key("").and_then(Slot::as_i64), Some(1));
        let empty = config.node("").unwrap();
        assert_eq!(empty.get_key("b").and_then(Slot::as_i64), Some(2));
    }

    #[test]
    fn test_index_sugar_uses_paths() {
        let config = sample();
        assert_eq!(config["a.b.c"].as_i64(), Some(1));
        assert!(config["a.b.missing"].is_null());
        assert!(config["top.x"].is_null());
    }
}
