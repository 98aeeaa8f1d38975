// File: src/value.rs
// Purpose: Dynamically typed field values

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current contents of every field, keyed by field name
pub type Values = BTreeMap<String, Value>;

/// Field name to error message. A missing key means "no error".
pub type Errors = BTreeMap<String, String>;

/// Field name to touched flag
pub type Touched = BTreeMap<String, bool>;

/// A single field value as produced by an input control
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// No value. Covers both "null" and "never set".
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
}

impl Value {
    /// Empty for presence checks: null, `""`, or whitespace only.
    ///
    /// Numeric zero and `false` are values, not absence.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => gsm_forms_validation::is_blank(s),
            Value::Bool(_) | Value::Number(_) | Value::Array(_) => false,
        }
    }

    /// Numeric coercion used by `min`/`max` bounds.
    ///
    /// Strings are trimmed before parsing and an empty string is zero.
    /// Anything that cannot be read as a number becomes NaN, including
    /// `inf`/`nan` spellings that Rust's float parser would accept.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Null => 0.0,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Number(n) => *n,
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    0.0
                } else {
                    s.parse::<f64>()
                        .ok()
                        .filter(|n| n.is_finite())
                        .unwrap_or(f64::NAN)
                }
            }
            Value::Array(_) => f64::NAN,
        }
    }

    /// Checkbox coercion
    pub fn to_bool(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) => true,
            Value::Null => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Convert value to string for display
    pub fn display(&self) -> String {
        match self {
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => {
                // Format number nicely (remove .0 for integers)
                if n.fract() == 0.0 && n.is_finite() {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            Value::String(s) => s.clone(),
            Value::Array(arr) => {
                let items: Vec<String> = arr.iter().map(|v| v.display()).collect();
                items.join(", ")
            }
            Value::Null => String::new(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
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

impl From<u16> for Value {
    fn from(n: u16) -> Self {
        Value::Number(n as f64)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(arr: Vec<Value>) -> Self {
        Value::Array(arr)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Null),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            // Nested objects are not form fields; keep their JSON text
            obj @ serde_json::Value::Object(_) => Value::String(obj.to_string()),
        }
    }
}

/// Build a [`Values`] map from a JSON object, e.g. a record fetched for an
/// edit form. Non-object input yields an empty map.
pub fn values_from_json(json: serde_json::Value) -> Values {
    match json {
        serde_json::Value::Object(map) => map
            .into_iter()
            .map(|(k, v)| (k, Value::from(v)))
            .collect(),
        _ => Values::new(),
    }
}

/// Build a [`Values`] map from `(name, value)` pairs
pub fn values<K, V, I>(pairs: I) -> Values
where
    K: Into<String>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_emptiness() {
        assert!(Value::Null.is_empty());
        assert!(Value::from("").is_empty());
        assert!(Value::from("   ").is_empty());

        assert!(!Value::from(0).is_empty());
        assert!(!Value::from(false).is_empty());
        assert!(!Value::from("0").is_empty());
        assert!(!Value::Array(vec![]).is_empty());
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(Value::from(" 42 ").to_number(), 42.0);
        assert_eq!(Value::from("").to_number(), 0.0);
        assert_eq!(Value::from(true).to_number(), 1.0);
        assert_eq!(Value::Null.to_number(), 0.0);
        assert!(Value::from("abc").to_number().is_nan());
        assert!(Value::Array(vec![]).to_number().is_nan());
    }

    #[test]
    fn test_non_finite_spellings_are_nan() {
        assert!(Value::from("inf").to_number().is_nan());
        assert!(Value::from("-Infinity").to_number().is_nan());
        assert!(Value::from("NaN").to_number().is_nan());
        assert_eq!(Value::from("1e3").to_number(), 1000.0);
    }

    #[test]
    fn test_from_json_record() {
        let record = values_from_json(json!({
            "name": "Ромашка",
            "limit": 1500,
            "active": true,
            "comment": null,
        }));

        assert_eq!(record["name"], Value::from("Ромашка"));
        assert_eq!(record["limit"], Value::Number(1500.0));
        assert_eq!(record["active"], Value::Bool(true));
        assert_eq!(record["comment"], Value::Null);
        assert!(values_from_json(json!([1, 2])).is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from(25).display(), "25");
        assert_eq!(Value::from(2.5).display(), "2.5");
        assert_eq!(Value::Null.display(), "");
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<&str>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }
}
