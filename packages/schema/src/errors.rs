//! Error types for schema validation and composition

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A field failed its enumeration or type check. The caller must
    /// substitute the field's default, never persist the rejected value.
    #[error("Invalid value for field: {field}")]
    InvalidFieldValue { field: String },

    /// A subtype schema tried to change the value type of an inherited
    /// field. Composition may add fields and override descriptors, but
    /// never retype what the base declared.
    #[error("Incompatible override for inherited field: {field}")]
    IncompatibleOverride { field: String },
}

impl SchemaError {
    /// Field name the error refers to
    pub fn field(&self) -> &str {
        match self {
            SchemaError::InvalidFieldValue { field } => field,
            SchemaError::IncompatibleOverride { field } => field,
        }
    }
}
