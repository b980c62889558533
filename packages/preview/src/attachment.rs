//! Selected attachment snapshot
//!
//! A read-mostly snapshot of attachment metadata owned by the control.
//! Replaced wholesale on each successful selection or edit, never
//! partially mutated.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentError {
    /// The backing media item cannot be found anymore
    Missing,
    /// Any other resolution failure
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentSnapshot {
    /// Attachment identifier; `0` is the sentinel for "no backing
    /// attachment" (externally authored embed)
    pub id: u64,
    pub url: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub description: String,
    /// Error marker set by whoever resolved the attachment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<AttachmentError>,
}

impl AttachmentSnapshot {
    pub fn new(id: u64, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            caption: String::new(),
            description: String::new(),
            error: None,
        }
    }

    /// Snapshot representing an attachment that could not be resolved
    pub fn missing(id: u64) -> Self {
        Self {
            id,
            url: String::new(),
            caption: String::new(),
            description: String::new(),
            error: Some(AttachmentError::Missing),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self.error, Some(AttachmentError::Missing))
    }
}
