//! Serde support for the tree.
//!
//! Serialization mirrors [`ConfigNode::all`]: list-like nodes become
//! sequences, all other nodes become maps in insertion order. Deserializing
//! a node goes through [`Value`] and then normalization, so any self-describing
//! serde format can feed the tree.

use serde::de::Error as _;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::node::ConfigNode;
use crate::types::{Slot, Value};

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Slot::Scalar(scalar) => scalar.serialize(serializer),
            Slot::Nested(node) => node.serialize(serializer),
        }
    }
}

impl Serialize for ConfigNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_list() {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for (_, slot) in self {
                seq.serialize_element(slot)?;
            }
            seq.end()
        } else {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (key, slot) in self {
                map.serialize_entry(key, slot)?;
            }
            map.end()
        }
    }
}

impl<'de> Deserialize<'de> for ConfigNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ConfigNode::try_from(value).map_err(D::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Slot::from)
    }
}
