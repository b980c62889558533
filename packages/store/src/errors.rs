//! Error types for the instance store

use thiserror::Error;

/// Failures the store surfaces to its caller.
///
/// Field-level validation problems are not errors here: the save path
/// recovers them by reverting to defaults and reports them through
/// [`SaveOutcome`](crate::SaveOutcome).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
