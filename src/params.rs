//! Request parameters and deterministic serialization

use crate::encoding::encode;
use std::collections::BTreeMap;
use std::fmt;

/// A stringifiable parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Text value
    String(String),
    /// Signed integer value
    Int(i64),
    /// Unsigned integer value
    UInt(u64),
    /// Floating-point value
    Float(f64),
    /// Boolean value
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::String(value) => f.write_str(value),
            ParamValue::Int(value) => write!(f, "{}", value),
            ParamValue::UInt(value) => write!(f, "{}", value),
            ParamValue::Float(value) => write!(f, "{}", value),
            ParamValue::Bool(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::UInt(value.into())
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        ParamValue::UInt(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

/// Serialization target for a parameter set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Query-string component appended to the URL
    Query,
    /// Form-encoded request body
    Body,
}

/// An ordered mapping of request parameters.
///
/// Keys iterate in ascending lexicographic order, so serialization is
/// deterministic for any insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, returning the previous value for the key if any
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Look up a parameter by key
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over entries in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Serialize the set for the given target.
    ///
    /// Keys and values are percent-encoded. The `Query` target exempts
    /// `+` and `-` in values and prefixes the output with `?` when the
    /// set is non-empty. The `Body` target first replaces literal spaces
    /// in values with `+`, then encodes exempting `+`. An empty set
    /// serializes to the empty string for both targets.
    pub fn serialize(&self, target: Target) -> String {
        if self.0.is_empty() {
            return String::new();
        }

        let pairs: Vec<String> = self
            .0
            .iter()
            .map(|(key, value)| {
                let key = encode(key, b"");
                let value = value.to_string();
                match target {
                    Target::Query => format!("{}={}", key, encode(&value, b"+-")),
                    Target::Body => {
                        format!("{}={}", key, encode(&value.replace(' ', "+"), b"+"))
                    }
                }
            })
            .collect();

        let joined = pairs.join("&");
        match target {
            Target::Query => format!("?{}", joined),
            Target::Body => joined,
        }
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Params(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<ParamValue>> Extend<(K, V)> for Params {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0
            .extend(iter.into_iter().map(|(key, value)| (key.into(), value.into())));
    }
}
