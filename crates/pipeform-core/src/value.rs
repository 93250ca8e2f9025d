//! Decoded configuration tree values.

use derive_more::Display;
use indexmap::IndexMap;

use crate::{Error, Result};

/// Ordered mapping of textual keys to values.
pub type Mapping = IndexMap<String, Value>;

/// A decoded configuration tree.
///
/// Recursively an ordered mapping, an ordered sequence, or a scalar. Mapping
/// keys are always textual; scalar keys coming from decoded YAML are
/// normalized to their text form, container keys are rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

/// A numeric scalar, integer or floating point.
#[derive(Debug, Clone, Copy, PartialEq, Display)]
pub enum Number {
    #[display("{_0}")]
    Int(i64),
    #[display("{_0}")]
    Float(f64),
}

impl Value {
    /// Whether this node is a string scalar.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// The string slice if this node is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The entries if this node is a mapping.
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Cast any value to its textual form.
    ///
    /// Scalars render naturally (null as the empty string); sequences and
    /// mappings render as compact JSON.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            Value::Sequence(_) | Value::Mapping(_) => {
                serde_json::to_string(&self.to_json()).unwrap_or_default()
            }
        }
    }

    /// Decode a `serde_yaml` value into an owned tree.
    ///
    /// Scalar mapping keys are normalized to text; a sequence or mapping used
    /// as a key is an error.
    pub fn from_yaml(value: serde_yaml::Value) -> Result<Self> {
        match value {
            serde_yaml::Value::Null => Ok(Value::Null),
            serde_yaml::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_yaml::Value::Number(n) => Ok(Value::Number(Number::from_yaml(&n))),
            serde_yaml::Value::String(s) => Ok(Value::String(s)),
            serde_yaml::Value::Sequence(seq) => Ok(Value::Sequence(
                seq.into_iter().map(Value::from_yaml).collect::<Result<_>>()?,
            )),
            serde_yaml::Value::Mapping(map) => {
                let mut entries = Mapping::with_capacity(map.len());
                for (key, val) in map {
                    let key = match Value::from_yaml(key)? {
                        Value::Sequence(_) => return Err(Error::UnsupportedKey("sequence")),
                        Value::Mapping(_) => return Err(Error::UnsupportedKey("mapping")),
                        scalar => scalar.to_text(),
                    };
                    entries.insert(key, Value::from_yaml(val)?);
                }
                Ok(Value::Mapping(entries))
            }
            serde_yaml::Value::Tagged(tagged) => Value::from_yaml(tagged.value),
        }
    }

    /// Encode the tree back into a `serde_yaml` value.
    pub fn into_yaml(self) -> serde_yaml::Value {
        match self {
            Value::Null => serde_yaml::Value::Null,
            Value::Bool(b) => serde_yaml::Value::Bool(b),
            Value::Number(Number::Int(i)) => serde_yaml::Value::Number(i.into()),
            Value::Number(Number::Float(f)) => serde_yaml::Value::Number(f.into()),
            Value::String(s) => serde_yaml::Value::String(s),
            Value::Sequence(seq) => {
                serde_yaml::Value::Sequence(seq.into_iter().map(Value::into_yaml).collect())
            }
            Value::Mapping(map) => serde_yaml::Value::Mapping(
                map.into_iter()
                    .map(|(k, v)| (serde_yaml::Value::String(k), v.into_yaml()))
                    .collect(),
            ),
        }
    }

    /// Encode the tree as a `serde_json` value.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(Number::Int(i)) => serde_json::Value::Number((*i).into()),
            Value::Number(Number::Float(f)) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Sequence(seq) => {
                serde_json::Value::Array(seq.iter().map(Value::to_json).collect())
            }
            Value::Mapping(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }
}

impl Number {
    fn from_yaml(n: &serde_yaml::Number) -> Self {
        match n.as_i64() {
            Some(i) => Number::Int(i),
            None => Number::Float(n.as_f64().unwrap_or(f64::NAN)),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(Number::Int(i))
    }
}
