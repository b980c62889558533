//! Error types for the editor

use mediakit_preview::PreviewError;
use mediakit_schema::SchemaError;
use mediakit_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Unknown field: {field}")]
    UnknownField { field: String },

    #[error("Value for field {field} cannot be coerced to its declared type")]
    TypeMismatch { field: String },

    #[error("Invalid selection session transition: {event} while {from}")]
    InvalidSessionTransition {
        from: &'static str,
        event: &'static str,
    },

    #[error("No selection session is active")]
    NoActiveSession,

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Preview error: {0}")]
    Preview(#[from] PreviewError),
}
