//! Dynamically typed compile arguments.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! A compile call arrives as loosely typed keyword input (from JSON, from a
//! command line, or from an embedding host). [`RawArgs`] holds that input
//! untouched so that validation in [`crate::args`] can report exactly which
//! keyword had the wrong shape.

use std::collections::BTreeMap;

/// A single loosely typed argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Vec<ArgValue>),
    Map(BTreeMap<String, ArgValue>),
}

impl ArgValue {
    /// Whether the value counts as "not given" (`None`).
    pub fn is_none(&self) -> bool {
        matches!(self, ArgValue::None)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[ArgValue]> {
        match self {
            ArgValue::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Short name of the value's type, used in log output.
    pub fn type_name(&self) -> &'static str {
        match self {
            ArgValue::None => "none",
            ArgValue::Bool(_) => "bool",
            ArgValue::Int(_) => "int",
            ArgValue::Float(_) => "float",
            ArgValue::Str(_) => "string",
            ArgValue::Seq(_) => "sequence",
            ArgValue::Map(_) => "map",
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Str(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::Str(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Bool(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::Int(value)
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        ArgValue::Float(value)
    }
}

impl<T: Into<ArgValue>> From<Vec<T>> for ArgValue {
    fn from(items: Vec<T>) -> Self {
        ArgValue::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ArgValue>> From<Option<T>> for ArgValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ArgValue::None, Into::into)
    }
}

impl<A: Into<ArgValue>, B: Into<ArgValue>> From<(A, B)> for ArgValue {
    fn from((a, b): (A, B)) -> Self {
        ArgValue::Seq(vec![a.into(), b.into()])
    }
}

impl From<serde_json::Value> for ArgValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => ArgValue::None,
            Value::Bool(b) => ArgValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ArgValue::Int(i),
                None => ArgValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => ArgValue::Str(s),
            Value::Array(items) => ArgValue::Seq(items.into_iter().map(ArgValue::from).collect()),
            Value::Object(map) => ArgValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, ArgValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Raw input of one compile call: positional arguments and keywords.
///
/// Positional arguments are never valid, but they are kept so the resolver
/// can reject them with a precise message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawArgs {
    pub positional: Vec<ArgValue>,
    pub keywords: BTreeMap<String, ArgValue>,
}

impl RawArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a keyword argument.
    pub fn keyword(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.keywords.insert(name.into(), value.into());
        self
    }

    /// Append a positional argument.
    pub fn positional(mut self, value: impl Into<ArgValue>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.keywords.get(name)
    }

    /// Build arguments from a JSON document.
    ///
    /// An object supplies keywords, an array supplies positional arguments,
    /// and any other value is taken as a single positional argument.
    pub fn from_json_value(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => Self {
                positional: Vec::new(),
                keywords: map
                    .into_iter()
                    .map(|(k, v)| (k, ArgValue::from(v)))
                    .collect(),
            },
            serde_json::Value::Array(items) => Self {
                positional: items.into_iter().map(ArgValue::from).collect(),
                keywords: BTreeMap::new(),
            },
            other => Self {
                positional: vec![ArgValue::from(other)],
                keywords: BTreeMap::new(),
            },
        }
    }

    pub fn from_json_str(source: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(source)?;
        Ok(Self::from_json_value(value))
    }
}
