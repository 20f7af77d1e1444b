//! Deep merging of configuration trees.
//!
//! `mix` folds another tree into the receiver key by key:
//!
//! - keys only in the receiver are kept
//! - keys only in the incoming tree are added
//! - keys holding a child node on both sides are merged recursively
//! - every other conflict is won by the incoming side
//!
//! Two list-like nodes (see [`ConfigNode::is_list`]) are never merged item
//! by item; the incoming list replaces the receiver's. A list meeting a
//! mapping node merges key by key like any other pair of nodes.

use tracing::trace;

use crate::node::ConfigNode;
use crate::types::Slot;

impl ConfigNode {
    /// Merge `other` into this node in place.
    ///
    /// Entries are processed in `other`'s iteration order and keys are taken
    /// literally. Incoming subtrees are cloned, so the receiver never shares
    /// storage with `other`.
    pub fn mix(&mut self, other: &ConfigNode) {
        for (key, incoming) in other {
            if let (Some(Slot::Nested(preset)), Slot::Nested(child)) =
                (self.get_key_mut(key), incoming)
            {
                if !(preset.is_list() && child.is_list()) {
                    trace!(key, "Merging nested node");
                    preset.mix(child);
                    continue;
                }
            }
            if self.contains_key(key) {
                trace!(key, "Overwriting slot");
            }
            self.insert(key, incoming.clone());
        }
    }

    /// Merge a sequence of layers into a fresh node.
    ///
    /// Layers are ordered by priority: first = lowest, last = highest.
    pub fn layered<'a, I>(layers: I) -> ConfigNode
    where
        I: IntoIterator<Item = &'a ConfigNode>,
    {
        let mut merged = ConfigNode::new();
        for layer in layers {
            merged.mix(layer);
        }
        merged
    }
}
