//! Nested configuration trees with dotted-path access and deep merging.
//!
//! This crate provides an in-memory configuration container. Loaders hand it
//! plain nested data, application code reads and writes it through literal
//! keys or dotted paths, and several trees can be folded together with
//! well-defined override rules.
//!
//! # Key Features
//!
//! - **Uniform tree**: every level is a [`ConfigNode`]; structured values are
//!   normalized into child nodes on assignment
//! - **Insertion order**: iteration, export and serialization follow the order
//!   keys were first inserted
//! - **Dotted paths**: `"format.html.theme"` descends through nested nodes,
//!   and `set` creates missing levels on the way
//! - **Deep merge**: [`ConfigNode::mix`] merges nested nodes recursively and
//!   lets the incoming side win every other conflict
//! - **Total operations**: missing keys yield `None` or a no-op, never an error
//!
//! # Architecture
//!
//! - [`Scalar`]: an atomic value (null, bool, integer, float, string)
//! - [`Value`]: plain nested data exchanged with loaders and exporters
//! - [`Slot`]: what a node stores under a key, a scalar or a child node
//! - [`ConfigNode`]: one level of the tree
//!
//! # Example
//!
//! ```rust
//! use config_tree::{ConfigNode, Slot};
//!
//! let mut defaults = ConfigNode::new();
//! defaults.set("app.db.host", "localhost");
//! defaults.set("app.db.port", 5432);
//!
//! let mut overrides = ConfigNode::new();
//! overrides.set("app.db.port", 6432);
//!
//! defaults.mix(&overrides);
//! assert_eq!(defaults.get("app.db.host").and_then(Slot::as_str), Some("localhost"));
//! assert_eq!(defaults["app.db.port"].as_i64(), Some(6432));
//! ```

mod types;
mod node;
mod path;
mod mix;
mod convert;
mod serialize;

/// Separator between segments of a dotted path.
pub const PATH_SEPARATOR: char = '.';

pub use types::{
    ConfigError,
    Scalar,
    Slot,
    Value,
};

pub use node::{
    ConfigNode,
    Iter,
};

pub use convert::{
    ConvertOptions,
    node_from_yaml,
    node_from_yaml_with_options,
    value_from_yaml,
    value_from_yaml_with_options,
};

// Re-export for convenience
pub use indexmap::IndexMap;
pub use yaml_rust2::Yaml;
