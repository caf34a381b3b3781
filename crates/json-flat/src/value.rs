//! Leaf value and type-tag definitions.

use serde::{Serialize, Serializer};
use serde_json::{Number, Value};
use std::fmt;
use thiserror::Error;

/// A value stored in a [`FlatDocument`](crate::FlatDocument).
///
/// This is a closed variant: flattening only ever records scalars and nulls
/// (arrays are exploded into `[i]` paths, objects into `.key` paths), but the
/// `Array` case exists so whole arrays can flow through documents assembled
/// with [`FlatDocument::from_pairs`](crate::FlatDocument::from_pairs) and be
/// compared index-positionally. Objects are never reachable as values.
#[derive(Debug, Clone)]
pub enum FlatValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<FlatValue>),
}

/// Runtime type tag of a [`FlatValue`], used to classify type mismatches.
///
/// Arrays are tagged distinctly from every scalar tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
}

impl FlatValue {
    /// Returns the type tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            FlatValue::Null => ValueKind::Null,
            FlatValue::Bool(_) => ValueKind::Boolean,
            FlatValue::Number(_) => ValueKind::Number,
            FlatValue::String(_) => ValueKind::String,
            FlatValue::Array(_) => ValueKind::Array,
        }
    }
}

/// Compares two JSON numbers numerically.
///
/// JSON has a single number type, so `1` and `1.0` are the same value even
/// though `serde_json` parses them into different representations.
///
/// # Example
///
/// ```
/// use json_flat::numbers_equal;
/// use serde_json::Number;
///
/// let int: Number = serde_json::from_str("1").unwrap();
/// let float: Number = serde_json::from_str("1.0").unwrap();
/// assert!(numbers_equal(&int, &float));
/// ```
pub fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

impl PartialEq for FlatValue {
    /// Strict equality: no cross-type coercion, numeric comparison for numbers.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FlatValue::Null, FlatValue::Null) => true,
            (FlatValue::Bool(a), FlatValue::Bool(b)) => a == b,
            (FlatValue::Number(a), FlatValue::Number(b)) => numbers_equal(a, b),
            (FlatValue::String(a), FlatValue::String(b)) => a == b,
            (FlatValue::Array(a), FlatValue::Array(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for FlatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlatValue::Null => write!(f, "null"),
            FlatValue::Bool(b) => write!(f, "{b}"),
            FlatValue::Number(n) => write!(f, "{n}"),
            FlatValue::String(s) => write!(f, "{s}"),
            FlatValue::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
        };
        write!(f, "{name}")
    }
}

impl Serialize for FlatValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FlatValue::Null => serializer.serialize_unit(),
            FlatValue::Bool(b) => serializer.serialize_bool(*b),
            FlatValue::Number(n) => n.serialize(serializer),
            FlatValue::String(s) => serializer.serialize_str(s),
            FlatValue::Array(items) => items.serialize(serializer),
        }
    }
}

/// Error converting a `serde_json::Value` into a [`FlatValue`].
///
/// Objects have no flat-value representation; they are always exploded into
/// per-key paths by the flattener.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("objects cannot be represented as flat values")]
pub struct ObjectValueError;

impl TryFrom<&Value> for FlatValue {
    type Error = ObjectValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(FlatValue::Null),
            Value::Bool(b) => Ok(FlatValue::Bool(*b)),
            Value::Number(n) => Ok(FlatValue::Number(n.clone())),
            Value::String(s) => Ok(FlatValue::String(s.clone())),
            Value::Array(items) => {
                let converted: Result<Vec<_>, _> = items.iter().map(FlatValue::try_from).collect();
                Ok(FlatValue::Array(converted?))
            }
            Value::Object(_) => Err(ObjectValueError),
        }
    }
}
