//! The configuration tree node.
//!
//! A [`ConfigNode`] is one level of the tree: an insertion-ordered map from
//! string keys to [`Slot`]s. Every nested level is another `ConfigNode`, so
//! there is no separate container or leaf type.
//!
//! This module holds storage, normalization, the literal (non-path)
//! accessors, iteration and export. Dotted-path access lives in
//! `path.rs`, merging in `mix.rs`.

use std::ops::Index;

use indexmap::IndexMap;

use crate::types::{ConfigError, Scalar, Slot, Value};

/// Returned by index sugar for paths that do not resolve.
static NULL_SLOT: Slot = Slot::Scalar(Scalar::Null);

/// A nested configuration tree.
///
/// Nodes are always mutable and exclusively own their children. Overwriting
/// or removing a slot drops the subtree it held.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigNode {
    slots: IndexMap<String, Slot>,
    /// Built from a sequence. Only affects export, see [`ConfigNode::is_list`].
    sequential: bool,
}

impl ConfigNode {
    /// Create an empty node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a node from a mapping.
    ///
    /// Keys are stored literally: a key containing `.` is not treated as a
    /// path, so `ConfigNode::from_mapping(m).all()` reproduces `m`.
    pub fn from_mapping(entries: IndexMap<String, Value>) -> Self {
        let mut node = Self::new();
        for (key, value) in entries {
            node.insert(key, value);
        }
        node
    }

    /// Build a node from a sequence, keyed by the decimal item indices.
    pub fn from_sequence(items: Vec<Value>) -> Self {
        let mut node = Self::new();
        node.sequential = true;
        for (index, value) in items.into_iter().enumerate() {
            node.insert(index.to_string(), value);
        }
        node
    }

    /// Check if this node is list-like.
    ///
    /// True when the node was built from a sequence and its keys are still
    /// exactly `"0".."n-1"` in order. List-like nodes export as sequences, and
    /// [`ConfigNode::mix`] replaces one list with another instead of merging.
    pub fn is_list(&self) -> bool {
        self.sequential
            && self
                .slots
                .keys()
                .enumerate()
                .all(|(index, key)| is_index_key(key, index))
    }

    /// Number of direct (non-recursive) slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Check if `key` exists as a literal slot name.
    pub fn contains_key(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    /// Get the slot stored under the literal `key`.
    pub fn get_key(&self, key: &str) -> Option<&Slot> {
        self.slots.get(key)
    }

    pub fn get_key_mut(&mut self, key: &str) -> Option<&mut Slot> {
        self.slots.get_mut(key)
    }

    /// Store `value` under the literal `key`, returning the previous slot.
    ///
    /// Structured values are normalized into child nodes. Overwriting an
    /// existing key keeps its position in iteration order.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Slot>) -> Option<Slot> {
        self.slots.insert(key.into(), value.into())
    }

    /// Remove the literal `key`, keeping the order of the remaining slots.
    pub fn remove_key(&mut self, key: &str) -> Option<Slot> {
        self.slots.shift_remove(key)
    }

    /// Iterate over `(key, slot)` pairs in insertion order.
    ///
    /// Iteration is shallow: nested slots yield the child node itself.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.slots.iter(),
        }
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.slots.keys().map(String::as_str)
    }

    /// Export the whole tree as plain data.
    ///
    /// Nested slots are replaced by their child's export; scalars are cloned.
    /// The result shares no storage with the tree. List-like nodes export as
    /// sequences, everything else as mappings.
    pub fn all(&self) -> Value {
        if self.is_list() {
            Value::Sequence(self.slots.values().map(Slot::to_value).collect())
        } else {
            Value::Mapping(
                self.slots
                    .iter()
                    .map(|(key, slot)| (key.clone(), slot.to_value()))
                    .collect(),
            )
        }
    }
}

/// Check `key` is the canonical decimal spelling of `index` ("1", not "01" or "+1").
fn is_index_key(key: &str, index: usize) -> bool {
    !key.is_empty()
        && key.bytes().all(|b| b.is_ascii_digit())
        && (key == "0" || !key.starts_with('0'))
        && key.parse::<usize>() == Ok(index)
}

impl From<IndexMap<String, Value>> for ConfigNode {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Self::from_mapping(entries)
    }
}

impl TryFrom<Value> for ConfigNode {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Mapping(entries) => Ok(Self::from_mapping(entries)),
            Value::Sequence(items) => Ok(Self::from_sequence(items)),
            Value::Scalar(scalar) => Err(ConfigError::NotANode {
                found: scalar.kind(),
            }),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ConfigNode
where
    K: Into<String>,
    V: Into<Slot>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut node = Self::new();
        for (key, value) in iter {
            node.insert(key, value);
        }
        node
    }
}

/// Path-aware lookup that never panics.
///
/// Missing paths, and paths that try to descend through a scalar, yield a
/// null slot. Use [`ConfigNode::has`] when a stored null must be told apart
/// from absence.
impl Index<&str> for ConfigNode {
    type Output = Slot;

    fn index(&self, path: &str) -> &Slot {
        self.get(path).unwrap_or(&NULL_SLOT)
    }
}

/// Shallow iterator over a node's slots.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: indexmap::map::Iter<'a, String, Slot>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Slot);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, slot)| (key.as_str(), slot))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a ConfigNode {
    type Item = (&'a str, &'a Slot);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for ConfigNode {
    type Item = (String, Slot);
    type IntoIter = indexmap::map::IntoIter<String, Slot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter()
    }
}
