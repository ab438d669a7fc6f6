//! Runtime value representation for the resolver.
//!
//! Values are dynamically typed. Each value classifies into a [`ValueKind`],
//! which is the type tag a value cell receives when none is given.

use crate::callable::Callable;
use indexmap::IndexMap;
use std::fmt;

/// Runtime values held by value cells and passed to callables
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value. A cell holding this is unset.
    #[default]
    Undefined,
    Null,
    Boolean(bool),
    /// 64-bit floating point number
    Number(f64),
    /// UTF-8 string
    String(String),
    /// Ordered list of values
    List(Vec<Value>),
    /// String-keyed map preserving insertion order
    Object(IndexMap<String, Value>),
    Function(Callable),
}

/// Classification of a value, as used for inferred cell types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Undefined,
    Object,
    Boolean,
    Number,
    String,
    Function,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Undefined => "undefined",
            ValueKind::Object => "object",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Function => "function",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// Build an object value from key/value pairs
    pub fn object<K, I>(entries: I) -> Value
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Classify this value. `Null` and lists are objects.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Undefined => ValueKind::Undefined,
            Value::Null | Value::List(_) | Value::Object(_) => ValueKind::Object,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Function(_) => ValueKind::Function,
        }
    }

    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        self.kind().as_str()
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::List(_) | Value::Object(_) | Value::Function(_) => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_callable(&self) -> Option<&Callable> {
        match self {
            Value::Function(callable) => Some(callable),
            _ => None,
        }
    }

    /// Numeric coercion: empty or blank strings are zero, unparseable text
    /// and non-primitive values are NaN
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Undefined => f64::NAN,
            Value::Null => 0.0,
            Value::Boolean(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Number(n) => *n,
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().unwrap_or(f64::NAN)
                }
            }
            Value::List(items) => match items.as_slice() {
                [] => 0.0,
                [single] => Value::String(single.to_string_repr()).to_number(),
                _ => f64::NAN,
            },
            Value::Object(_) | Value::Function(_) => f64::NAN,
        }
    }

    /// Convert to string representation
    pub fn to_string_repr(&self) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::String(s) => s.clone(),
            Value::List(items) => items
                .iter()
                .map(|item| match item {
                    Value::Undefined | Value::Null => String::new(),
                    other => other.to_string_repr(),
                })
                .collect::<Vec<_>>()
                .join(","),
            Value::Object(_) => "[object Object]".to_string(),
            Value::Function(callable) => callable.to_string(),
        }
    }

    /// Convert to display string (for CLI output, strings quoted)
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Function(callable) => callable.to_string(),
            other => other
                .to_json_string()
                .unwrap_or_else(|| other.to_string_repr()),
        }
    }

    /// JSON form of this value.
    ///
    /// Undefined and function values have none at the top level; inside an
    /// object they are dropped and inside a list they become `null`.
    pub fn to_json(&self) -> Option<serde_json::Value> {
        match self {
            Value::Undefined | Value::Function(_) => None,
            Value::Null => Some(serde_json::Value::Null),
            Value::Boolean(b) => Some(serde_json::Value::Bool(*b)),
            Value::Number(n) => Some(number_to_json(*n)),
            Value::String(s) => Some(serde_json::Value::String(s.clone())),
            Value::List(items) => Some(serde_json::Value::Array(
                items
                    .iter()
                    .map(|item| item.to_json().unwrap_or(serde_json::Value::Null))
                    .collect(),
            )),
            Value::Object(map) => Some(serde_json::Value::Object(
                map.iter()
                    .filter_map(|(key, value)| value.to_json().map(|json| (key.clone(), json)))
                    .collect(),
            )),
        }
    }

    pub fn to_json_string(&self) -> Option<String> {
        self.to_json().map(|json| json.to_string())
    }

    pub fn from_json(json: serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from_json(value)))
                    .collect(),
            ),
        }
    }

    /// Read a literal: JSON syntax, plus the bare word `undefined`
    pub fn parse_literal(text: &str) -> Result<Value, serde_json::Error> {
        let text = text.trim();
        if text == "undefined" {
            return Ok(Value::Undefined);
        }
        serde_json::from_str(text).map(Value::from_json)
    }
}

// Largest integer an f64 holds exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn number_to_json(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_repr())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
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

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Callable> for Value {
    fn from(callable: Callable) -> Self {
        Value::Function(callable)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Value::from_json(json)
    }
}
