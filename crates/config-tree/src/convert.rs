//! Conversion from YAML to plain configuration data.
//!
//! This is the boundary where non-string keys can appear. YAML mappings may
//! use integers, booleans or even sequences as keys; those entries are
//! dropped rather than coerced to strings.
//!
//! # Depth Limiting
//!
//! Conversion enforces a maximum depth to keep hostile input from
//! overflowing the stack. The default limit is 256 levels.

use indexmap::IndexMap;
use tracing::debug;
use yaml_rust2::Yaml;

use crate::node::ConfigNode;
use crate::types::{ConfigError, Scalar, Value};

/// Options for conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Maximum nesting depth (default: 256).
    ///
    /// Conversion fails with `ConfigError::NestingTooDeep` past this depth.
    pub max_depth: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

/// Convert a YAML document into plain data with default options.
pub fn value_from_yaml(yaml: &Yaml) -> Result<Value, ConfigError> {
    value_from_yaml_with_options(yaml, &ConvertOptions::default())
}

/// Convert a YAML document into plain data.
pub fn value_from_yaml_with_options(
    yaml: &Yaml,
    options: &ConvertOptions,
) -> Result<Value, ConfigError> {
    convert(yaml, 0, options, &mut Vec::new())
}

/// Convert a YAML document into a tree.
///
/// The document root must be a mapping or a sequence.
pub fn node_from_yaml(yaml: &Yaml) -> Result<ConfigNode, ConfigError> {
    node_from_yaml_with_options(yaml, &ConvertOptions::default())
}

pub fn node_from_yaml_with_options(
    yaml: &Yaml,
    options: &ConvertOptions,
) -> Result<ConfigNode, ConfigError> {
    ConfigNode::try_from(value_from_yaml_with_options(yaml, options)?)
}

fn convert(
    yaml: &Yaml,
    depth: usize,
    options: &ConvertOptions,
    path: &mut Vec<String>,
) -> Result<Value, ConfigError> {
    if depth > options.max_depth {
        return Err(ConfigError::NestingTooDeep {
            max_depth: options.max_depth,
            path: path.clone(),
        });
    }

    let value = match yaml {
        Yaml::Null => Value::null(),
        Yaml::Boolean(b) => Value::from(*b),
        Yaml::Integer(i) => Value::from(*i),
        Yaml::String(s) => Value::from(s.as_str()),
        Yaml::Real(text) => match yaml.as_f64() {
            Some(f) => Value::from(f),
            None => return Err(ConfigError::InvalidReal { text: text.clone() }),
        },
        Yaml::Array(items) => {
            let mut converted = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                path.push(index.to_string());
                converted.push(convert(item, depth + 1, options, path)?);
                path.pop();
            }
            Value::Sequence(converted)
        }
        Yaml::Hash(entries) => {
            let mut converted = IndexMap::with_capacity(entries.len());
            for (key, item) in entries {
                let Some(key) = key.as_str() else {
                    debug!(key = ?key, path = %path.join("."), "Ignoring non-string key");
                    continue;
                };
                path.push(key.to_string());
                converted.insert(key.to_string(), convert(item, depth + 1, options, path)?);
                path.pop();
            }
            Value::Mapping(converted)
        }
        Yaml::Alias(_) => return Err(ConfigError::UnsupportedYaml { kind: "alias" }),
        Yaml::BadValue => return Err(ConfigError::UnsupportedYaml { kind: "bad value" }),
    };
    Ok(value)
}

impl From<Scalar> for Yaml {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Null => Yaml::Null,
            Scalar::Bool(b) => Yaml::Boolean(b),
            Scalar::Integer(i) => Yaml::Integer(i),
            Scalar::Float(f) => Yaml::Real(f.to_string()),
            Scalar::String(s) => Yaml::String(s),
        }
    }
}

/// Render plain data back into YAML, e.g. for `yaml_rust2::YamlEmitter`.
impl From<Value> for Yaml {
    fn from(value: Value) -> Self {
        match value {
            Value::Scalar(scalar) => Yaml::from(scalar),
            Value::Sequence(items) => Yaml::Array(items.into_iter().map(Yaml::from).collect()),
            Value::Mapping(entries) => Yaml::Hash(
                entries
                    .into_iter()
                    .map(|(key, value)| (Yaml::String(key), Yaml::from(value)))
                    .collect(),
            ),
        }
    }
}
