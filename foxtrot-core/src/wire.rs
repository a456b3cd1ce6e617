//! Wire type tags and value decoding
//!
//! The controller reports a type tag next to each variable in the `LIST`
//! reply. Only string-like and boolean tags change how a raw value is
//! interpreted; every other tag passes the raw text through unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire type tag reported by the controller (e.g. `STRING`, `BOOL`, `REAL`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WireType(String);

impl WireType {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Tags starting with `STRING` carry quoted text
    pub fn is_string(&self) -> bool {
        self.0.starts_with("STRING")
    }

    /// Tags starting with `BOOL` carry `0`/`1`
    pub fn is_bool(&self) -> bool {
        self.0.starts_with("BOOL")
    }

    /// Decode a raw field value according to this tag
    pub fn decode(&self, raw: &str) -> Value {
        if self.is_string() {
            Value::Text(raw.replace('"', ""))
        } else if self.is_bool() {
            Value::Bool(raw == "1")
        } else {
            Value::Raw(raw.to_string())
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WireType {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Decode a raw value given its wire type tag
pub fn decode(tag: &str, raw: &str) -> Value {
    WireType::new(tag).decode(raw)
}

/// Decoded variable value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Text with quoting removed (`STRING*` tags)
    Text(String),
    /// Boolean (`BOOL*` tags)
    Bool(bool),
    /// Raw text for every other tag; numerics are left to the caller
    Raw(String),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) | Value::Raw(s) => Some(s),
            Value::Bool(_) => None,
        }
    }

    /// Parse raw numeric text
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Raw(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) | Value::Raw(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_string_strips_quotes() {
        assert_eq!(decode("STRING", "\"abc\""), Value::Text("abc".into()));
        assert_eq!(decode("STRING[32]", "\"a\"b\"\""), Value::Text("ab".into()));
    }

    #[test]
    fn test_decode_bool() {
        assert_eq!(decode("BOOL", "1"), Value::Bool(true));
        assert_eq!(decode("BOOL", "0"), Value::Bool(false));
        assert_eq!(decode("BOOL", "true"), Value::Bool(false));
    }

    #[test]
    fn test_decode_other_passes_through() {
        assert_eq!(decode("NUMBER", "42"), Value::Raw("42".into()));
        assert_eq!(decode("", "\"x\""), Value::Raw("\"x\"".into()));
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Raw(" 21.5".into()).as_f64(), Some(21.5));
        assert_eq!(Value::Text("21".into()).as_f64(), None);
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Bool(true).as_str(), None);
    }
}
