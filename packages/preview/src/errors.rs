//! Error types for preview rendering

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreviewError {
    /// The selected attachment is no longer resolvable. Rendered as a
    /// terminal local error state, no retry and no network.
    #[error("Selected attachment is no longer available")]
    MissingAttachment,

    /// The remote render round trip failed or was rejected. The user may
    /// retry by re-triggering any field change or reselecting.
    #[error("Preview render failed: {0}")]
    RenderFailed(String),
}
