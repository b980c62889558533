//! # Mediakit Editor
//!
//! Interactive editing engine for media widget instances.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ store: load persisted instance record       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: control + editing model + selection │
//! │  - Route user edits, emit change events     │
//! │  - Drive picker selection sessions          │
//! │  - Schedule token-guarded preview refreshes │
//! │  - Save with per-field revert on rejection  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ preview: local or remote render plan        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Nothing unsanitized persists**: the store validates every save;
//!    the model keeps raw values only while editing
//! 2. **Synchronous events**: field changes notify observers in the same
//!    turn, no hidden queuing
//! 3. **One in-flight preview**: the latest request supersedes any
//!    pending one; stale responses are discarded by token
//! 4. **Explicit collaborators**: schema, store, picker boundary, and
//!    remote renderer are injected, never looked up ambiently
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mediakit_editor::{ControlLabels, MediaControl, PickerMode};
//! use mediakit_schema::video_schema;
//! use mediakit_store::MemoryStore;
//!
//! let store = Box::new(MemoryStore::new(video_schema()));
//! let mut control = MediaControl::new(
//!     "widget-1",
//!     video_schema(),
//!     ControlLabels::video(),
//!     store,
//!     remote_renderer,
//! )?;
//!
//! // User picks a video.
//! let request = control.start_selection(PickerMode::SelectNew);
//! // ... picker runs, confirms ...
//! control.picker_opened()?;
//! let job = control.picker_confirmed(selection)?;
//!
//! // Drive the preview round trip.
//! if let Some(job) = job {
//!     control.drive_preview(job).await;
//! }
//!
//! // Persist.
//! let report = control.save()?;
//! ```

mod control;
mod errors;
mod l10n;
mod model;
mod session;

pub use control::{MediaControl, SaveReport};
pub use errors::EditorError;
pub use l10n::ControlLabels;
pub use model::{EditingModel, FieldChange};
pub use session::{
    PickerMode, PickerRequest, PickerSelection, PropertySet, ResolvedVia, SelectionSession,
    SessionState,
};

// Re-export common types for convenience
pub use mediakit_preview::{
    AttachmentError, AttachmentSnapshot, PreviewError, PreviewJob, PreviewMarkup, PreviewState,
    RemoteRenderer, RequestToken, ShortcodeRequest,
};
pub use mediakit_schema::{FieldValue, InstanceRecord, Schema};
pub use mediakit_store::{FileStore, InstanceStore, MemoryStore, SaveOutcome};
