//! Core value types for the configuration tree.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::node::ConfigNode;

/// An atomic configuration value.
///
/// Serializes untagged, so `Null` becomes `null` and the other variants
/// become the corresponding primitive.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

/// Plain nested data, the shape exchanged with loaders and exporters.
///
/// A `Value` carries no tree behavior of its own. Assigning a `Sequence` or
/// `Mapping` into a [`ConfigNode`] normalizes it into a child node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Scalar(Scalar),
    Sequence(Vec<Value>),
    Mapping(IndexMap<String, Value>),
}

/// A single named storage location inside a [`ConfigNode`].
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// An atomic value (including null).
    Scalar(Scalar),
    /// A child node, exclusively owned by the enclosing slot.
    Nested(ConfigNode),
}

impl Scalar {
    /// Check if this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as a float. Integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Float(f) => Some(*f),
            Scalar::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "bool",
            Scalar::Integer(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::String(_) => "string",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::String(s) => write!(f, "{}", s),
        }
    }
}

impl Value {
    /// The null value.
    pub fn null() -> Self {
        Value::Scalar(Scalar::Null)
    }

    /// Check if this value would normalize into a child node.
    pub fn is_structured(&self) -> bool {
        matches!(self, Value::Sequence(_) | Value::Mapping(_))
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Mapping(entries) => Some(entries),
            _ => None,
        }
    }
}

impl Slot {
    /// The null slot.
    pub fn null() -> Self {
        Slot::Scalar(Scalar::Null)
    }

    /// Check if this slot holds a child node.
    pub fn is_nested(&self) -> bool {
        matches!(self, Slot::Nested(_))
    }

    /// Check if this slot holds a null scalar.
    pub fn is_null(&self) -> bool {
        matches!(self, Slot::Scalar(Scalar::Null))
    }

    pub fn as_node(&self) -> Option<&ConfigNode> {
        match self {
            Slot::Nested(node) => Some(node),
            Slot::Scalar(_) => None,
        }
    }

    pub fn as_node_mut(&mut self) -> Option<&mut ConfigNode> {
        match self {
            Slot::Nested(node) => Some(node),
            Slot::Scalar(_) => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Slot::Scalar(scalar) => Some(scalar),
            Slot::Nested(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_str)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_scalar().and_then(Scalar::as_i64)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_scalar().and_then(Scalar::as_f64)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_scalar().and_then(Scalar::as_bool)
    }

    /// Export this slot as plain data.
    ///
    /// Nested slots are expanded recursively, like [`ConfigNode::all`].
    pub fn to_value(&self) -> Value {
        match self {
            Slot::Scalar(scalar) => Value::Scalar(scalar.clone()),
            Slot::Nested(node) => node.all(),
        }
    }
}

/// Normalization: structured values become child nodes, scalars are kept.
///
/// Every mutation of a [`ConfigNode`] goes through this conversion.
impl From<Value> for Slot {
    fn from(value: Value) -> Self {
        match value {
            Value::Scalar(scalar) => Slot::Scalar(scalar),
            Value::Sequence(items) => Slot::Nested(ConfigNode::from_sequence(items)),
            Value::Mapping(entries) => Slot::Nested(ConfigNode::from_mapping(entries)),
        }
    }
}

impl From<ConfigNode> for Slot {
    fn from(node: ConfigNode) -> Self {
        Slot::Nested(node)
    }
}

impl From<Scalar> for Slot {
    fn from(scalar: Scalar) -> Self {
        Slot::Scalar(scalar)
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Scalar(scalar)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Value::Mapping(entries)
    }
}

impl From<Vec<Value>> for Slot {
    fn from(items: Vec<Value>) -> Self {
        Slot::from(Value::Sequence(items))
    }
}

impl From<IndexMap<String, Value>> for Slot {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Slot::from(Value::Mapping(entries))
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty => |$v:ident| $scalar:expr),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from($v: $ty) -> Self {
                    $scalar
                }
            }

            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Scalar(Scalar::from(v))
                }
            }

            impl From<$ty> for Slot {
                fn from(v: $ty) -> Self {
                    Slot::Scalar(Scalar::from(v))
                }
            }
        )*
    };
}

impl_from_primitive! {
    bool => |v| Scalar::Bool(v),
    i32 => |v| Scalar::Integer(i64::from(v)),
    i64 => |v| Scalar::Integer(v),
    f64 => |v| Scalar::Float(v),
    &str => |v| Scalar::String(v.to_string()),
    String => |v| Scalar::String(v),
}

/// Errors raised at the boundary between plain data and the tree.
///
/// Tree operations themselves never fail; absence is reported with `Option`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Input nesting exceeds the configured maximum depth.
    #[error("Config nesting too deep (max depth: {max_depth}) at path: {}", path.join("."))]
    NestingTooDeep {
        /// Maximum allowed depth
        max_depth: usize,
        /// Path where the limit was exceeded
        path: Vec<String>,
    },

    /// A scalar was supplied where a mapping or sequence is required.
    #[error("Expected a mapping or sequence, found {found}")]
    NotANode {
        /// Kind of scalar that was found
        found: &'static str,
    },

    /// A YAML real that does not parse as a float.
    #[error("Invalid real number: {text}")]
    InvalidReal { text: String },

    /// A YAML node kind with no plain-data equivalent.
    #[error("Unsupported YAML value: {kind}")]
    UnsupportedYaml { kind: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_default_is_null() {
        assert!(Scalar::default().is_null());
    }

    #[test]
    fn test_scalar_accessors() {
        assert_eq!(Scalar::from(true).as_bool(), Some(true));
        assert_eq!(Scalar::from(7).as_i64(), Some(7));
        assert_eq!(Scalar::from(7).as_f64(), Some(7.0));
        assert_eq!(Scalar::from(1.5).as_f64(), Some(1.5));
        assert_eq!(Scalar::from("x").as_str(), Some("x"));
        assert_eq!(Scalar::from("x").as_i64(), None);
    }

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar::Null.to_string(), "null");
        assert_eq!(Scalar::from(false).to_string(), "false");
        assert_eq!(Scalar::from(42).to_string(), "42");
        assert_eq!(Scalar::from("hello").to_string(), "hello");
    }

    #[test]
    fn test_scalar_value_stays_scalar() {
        let slot = Slot::from(Value::from("plain"));
        assert_eq!(slot, Slot::Scalar(Scalar::String("plain".into())));
        assert!(!slot.is_nested());
    }

    #[test]
    fn test_mapping_value_normalizes_to_node() {
        let mut entries = IndexMap::new();
        entries.insert("hi".to_string(), Value::from("namaste"));

        let slot = Slot::from(Value::Mapping(entries));
        let node = slot.as_node().expect("mapping should normalize to a node");
        assert_eq!(node.get_key("hi").and_then(Slot::as_str), Some("namaste"));
    }

    #[test]
    fn test_sequence_value_normalizes_to_node() {
        let slot = Slot::from(vec![Value::from("a"), Value::from("b")]);
        let node = slot.as_node().expect("sequence should normalize to a node");
        assert_eq!(node.len(), 2);
        assert_eq!(node.get_key("1").and_then(Slot::as_str), Some("b"));
    }

    #[test]
    fn test_slot_to_value_expands_children() {
        let value = Value::Sequence(vec![Value::from(1), Value::null()]);
        assert_eq!(Slot::from(value.clone()).to_value(), value);
    }

    #[test]
    fn test_nesting_too_deep_message() {
        let err = ConfigError::NestingTooDeep {
            max_depth: 2,
            path: vec!["a".into(), "b".into(), "c".into()],
        };
        assert_eq!(
            err.to_string(),
            "Config nesting too deep (max depth: 2) at path: a.b.c"
        );
    }

    #[test]
    fn test_not_a_node_message() {
        let err = ConfigError::NotANode { found: "integer" };
        assert_eq!(err.to_string(), "Expected a mapping or sequence, found integer");
    }
}
