//! # Selection Session
//!
//! Transient state machine for picking or replacing a media attachment
//! through the external picker collaborator.
//!
//! ```text
//! Closed → Opening → Open → Resolved → Closed
//!                      └──→ Cancelled → Closed
//! ```
//!
//! A session exists only while a picker is open; once it resolves or is
//! cancelled the instance is discarded — a new selection is always a new
//! session, never a reuse.

use serde::{Deserialize, Serialize};

use crate::errors::EditorError;

/// What the control asked the picker to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PickerMode {
    SelectNew,
    ReplaceEmbed,
    EditDetails,
}

/// Request crossing the boundary to the picker collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerRequest {
    pub mode: PickerMode,
    /// Current attachment id, seeded for edit/replace flows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_attachment_id: Option<u64>,
}

/// Which named picker state the user confirmed from. This — not the
/// payload shape — decides how the property set is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedVia {
    Attachment,
    Embed,
}

/// What the picker yields on confirm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerSelection {
    pub resolved_via: ResolvedVia,
    pub attachment_id: u64,
    pub url: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link_type: String,
}

/// Fields the control applies to the attachment snapshot and the editing
/// model in a single step after a session resolves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySet {
    pub attachment_id: u64,
    pub url: String,
    pub caption: String,
    pub description: String,
    pub link_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    Opening,
    Open,
    Resolved,
    Cancelled,
}

impl SessionState {
    fn name(self) -> &'static str {
        match self {
            SessionState::Closed => "closed",
            SessionState::Opening => "opening",
            SessionState::Open => "open",
            SessionState::Resolved => "resolved",
            SessionState::Cancelled => "cancelled",
        }
    }
}

/// One picker interaction, from request to resolution or cancellation
#[derive(Debug)]
pub struct SelectionSession {
    mode: PickerMode,
    seed: Option<u64>,
    state: SessionState,
}

impl SelectionSession {
    /// Requesting a picker is what brings a session out of `Closed`.
    pub fn new(mode: PickerMode, seed: Option<u64>) -> Self {
        tracing::debug!(?mode, ?seed, "selection session opening");
        Self {
            mode,
            seed,
            state: SessionState::Opening,
        }
    }

    pub fn mode(&self) -> PickerMode {
        self.mode
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The request handed to the picker collaborator
    pub fn request(&self) -> PickerRequest {
        PickerRequest {
            mode: self.mode,
            seed_attachment_id: self.seed,
        }
    }

    /// Picker is ready for user interaction
    pub fn opened(&mut self) -> Result<(), EditorError> {
        match self.state {
            SessionState::Opening => {
                self.state = SessionState::Open;
                Ok(())
            }
            other => Err(EditorError::InvalidSessionTransition {
                from: other.name(),
                event: "opened",
            }),
        }
    }

    /// User confirmed; derive the property set.
    ///
    /// The attachment arm takes `link_type` from the currently active
    /// display setting, the embed arm from the payload's own link value.
    /// The asymmetry is inherited behavior, kept as-is.
    pub fn resolve(
        &mut self,
        selection: PickerSelection,
        active_link_type: &str,
    ) -> Result<PropertySet, EditorError> {
        match self.state {
            SessionState::Open => {
                self.state = SessionState::Resolved;
                let props = match selection.resolved_via {
                    ResolvedVia::Attachment => PropertySet {
                        attachment_id: selection.attachment_id,
                        url: selection.url,
                        caption: selection.caption,
                        description: selection.description,
                        link_type: active_link_type.to_string(),
                    },
                    // No backing attachment exists; the sentinel id is 0
                    // regardless of what the payload claims.
                    ResolvedVia::Embed => PropertySet {
                        attachment_id: 0,
                        url: selection.url,
                        caption: selection.caption,
                        description: selection.description,
                        link_type: selection.link_type,
                    },
                };
                tracing::debug!(attachment_id = props.attachment_id, "selection resolved");
                Ok(props)
            }
            other => Err(EditorError::InvalidSessionTransition {
                from: other.name(),
                event: "resolve",
            }),
        }
    }

    /// User dismissed without confirming; no property set is produced.
    pub fn cancel(&mut self) -> Result<(), EditorError> {
        match self.state {
            SessionState::Open => {
                self.state = SessionState::Cancelled;
                Ok(())
            }
            other => Err(EditorError::InvalidSessionTransition {
                from: other.name(),
                event: "cancel",
            }),
        }
    }

    /// Terminal transition; the session object is discarded after this.
    pub fn close(&mut self) -> Result<(), EditorError> {
        match self.state {
            SessionState::Resolved | SessionState::Cancelled => {
                self.state = SessionState::Closed;
                Ok(())
            }
            other => Err(EditorError::InvalidSessionTransition {
                from: other.name(),
                event: "close",
            }),
        }
    }
}
