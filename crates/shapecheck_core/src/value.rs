//! Candidate value representation.
//!
//! [`DataValue`] is the read-only input the validator judges. It deserializes
//! from any self-describing format (JSON, YAML, TOML) without a schema.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A key-value mapping of candidate data.
pub type DataMap = BTreeMap<String, DataValue>;

/// A value in a candidate document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    /// Null value (present, but empty)
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
    /// List/array value
    List(Vec<DataValue>),
    /// Map/object value
    Map(DataMap),
}

impl DataValue {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    /// Returns the category name of this value, as used in type mismatch reports.
    pub fn type_name(&self) -> &'static str {
        match self {
            DataValue::Null => "null",
            DataValue::Bool(_) => "boolean",
            DataValue::Int(_) | DataValue::Float(_) => "number",
            DataValue::String(_) => "string",
            DataValue::List(_) => "array",
            DataValue::Map(_) => "object",
        }
    }

    /// Attempts to get this value as a string.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            DataValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get this value as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            DataValue::Float(f) => Some(*f),
            DataValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Attempts to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DataValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to get this value as a list.
    pub fn as_list(&self) -> Option<&[DataValue]> {
        match self {
            DataValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Attempts to get this value as a map.
    pub fn as_map(&self) -> Option<&DataMap> {
        match self {
            DataValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Coerces this value to a number.
    ///
    /// Numbers pass through, `null` is 0, booleans are 0 or 1, and strings are
    /// parsed after trimming (an empty string is 0). Lists, maps and
    /// unparseable strings yield NaN.
    pub fn to_number(&self) -> f64 {
        match self {
            DataValue::Int(i) => *i as f64,
            DataValue::Float(f) => *f,
            DataValue::Null => 0.0,
            DataValue::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            DataValue::String(s) => parse_numeric(s),
            DataValue::List(_) | DataValue::Map(_) => f64::NAN,
        }
    }

    /// Renders the value for messages: strings unquoted, everything else as JSON.
    pub fn display(&self) -> String {
        match self {
            DataValue::String(s) => s.clone(),
            other => serde_json::to_string(other).unwrap_or_else(|_| other.type_name().into()),
        }
    }
}

/// Parses a numeric literal the way loosely-typed payloads spell numbers.
fn parse_numeric(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)]
        .iter()
        .find_map(|(prefix, radix)| s.strip_prefix(prefix).map(|digits| (digits, *radix)));
    if let Some((digits, radix)) = radix {
        return u64::from_str_radix(digits, radix)
            .map(|n| n as f64)
            .unwrap_or(f64::NAN);
    }

    // Rust accepts "inf" and "nan" spellings that payload producers never mean as numbers.
    if s.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return f64::NAN;
    }

    s.parse::<f64>().unwrap_or(f64::NAN)
}

impl From<serde_json::Value> for DataValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => DataValue::Null,
            serde_json::Value::Bool(b) => DataValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => DataValue::Int(i),
                None => DataValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => DataValue::String(s),
            serde_json::Value::Array(items) => {
                DataValue::List(items.into_iter().map(DataValue::from).collect())
            }
            serde_json::Value::Object(map) => DataValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, DataValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::String(s)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::String(s.to_string())
    }
}

impl From<i64> for DataValue {
    fn from(i: i64) -> Self {
        DataValue::Int(i)
    }
}

impl From<f64> for DataValue {
    fn from(f: f64) -> Self {
        DataValue::Float(f)
    }
}

impl From<bool> for DataValue {
    fn from(b: bool) -> Self {
        DataValue::Bool(b)
    }
}

impl From<DataMap> for DataValue {
    fn from(map: DataMap) -> Self {
        DataValue::Map(map)
    }
}

impl From<Vec<DataValue>> for DataValue {
    fn from(items: Vec<DataValue>) -> Self {
        DataValue::List(items)
    }
}
