//! Field value primitives
//!
//! Instance fields are limited to three value types. Values cross the
//! editing boundary as raw user input, so coercion (checkbox toggle to
//! boolean, numeric text to integer) lives here rather than in the
//! sanitizers.

use serde::{Deserialize, Serialize};

/// Declared type of a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Boolean,
    String,
    Integer,
}

/// A single field value as held by instance records and editing models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl FieldValue {
    /// The type this value currently has
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Bool(_) => FieldType::Boolean,
            FieldValue::Int(_) => FieldType::Integer,
            FieldValue::Str(_) => FieldType::String,
        }
    }

    /// Coerce into the declared type.
    ///
    /// Returns `None` when no sensible conversion exists (e.g. arbitrary
    /// text into an integer). Conversions mirror form-input semantics:
    /// checkbox values `"1"`/`"on"` become `true`, empty and `"0"` become
    /// `false`.
    pub fn coerce(self, target: FieldType) -> Option<FieldValue> {
        match (self, target) {
            (v @ FieldValue::Bool(_), FieldType::Boolean) => Some(v),
            (v @ FieldValue::Int(_), FieldType::Integer) => Some(v),
            (v @ FieldValue::Str(_), FieldType::String) => Some(v),

            (FieldValue::Int(n), FieldType::Boolean) => Some(FieldValue::Bool(n != 0)),
            (FieldValue::Str(s), FieldType::Boolean) => match s.as_str() {
                "" | "0" | "false" => Some(FieldValue::Bool(false)),
                "1" | "true" | "on" => Some(FieldValue::Bool(true)),
                _ => None,
            },

            (FieldValue::Bool(b), FieldType::Integer) => Some(FieldValue::Int(i64::from(b))),
            (FieldValue::Str(s), FieldType::Integer) => {
                s.trim().parse().ok().map(FieldValue::Int)
            }

            (FieldValue::Bool(b), FieldType::String) => {
                Some(FieldValue::Str(if b { "1" } else { "" }.to_string()))
            }
            (FieldValue::Int(n), FieldType::String) => Some(FieldValue::Str(n.to_string())),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Int(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkbox_coercion() {
        assert_eq!(
            FieldValue::from("1").coerce(FieldType::Boolean),
            Some(FieldValue::Bool(true))
        );
        assert_eq!(
            FieldValue::from("on").coerce(FieldType::Boolean),
            Some(FieldValue::Bool(true))
        );
        assert_eq!(
            FieldValue::from("").coerce(FieldType::Boolean),
            Some(FieldValue::Bool(false))
        );
        assert_eq!(FieldValue::from("maybe").coerce(FieldType::Boolean), None);
    }

    #[test]
    fn test_numeric_text_coercion() {
        assert_eq!(
            FieldValue::from(" 42 ").coerce(FieldType::Integer),
            Some(FieldValue::Int(42))
        );
        assert_eq!(FieldValue::from("abc").coerce(FieldType::Integer), None);
    }

    #[test]
    fn test_same_type_passthrough() {
        let v = FieldValue::from("hello");
        assert_eq!(v.clone().coerce(FieldType::String), Some(v));
    }

    #[test]
    fn test_untagged_serde_round_trip() {
        let json = r#"{"a": true, "b": 3, "c": "x"}"#;
        let map: std::collections::HashMap<String, FieldValue> =
            serde_json::from_str(json).unwrap();
        assert_eq!(map["a"], FieldValue::Bool(true));
        assert_eq!(map["b"], FieldValue::Int(3));
        assert_eq!(map["c"], FieldValue::Str("x".to_string()));
    }
}
