//! # Mediakit Preview
//!
//! Live preview planning for media widget editing.
//!
//! Given the selected attachment snapshot and the editing model's current
//! values, the renderer decides between a synchronous local error render
//! and an asynchronous round trip to the remote shortcode renderer, and
//! guards the response path with monotonically increasing request tokens
//! so a stale response never overwrites a newer one.
//!
//! ```text
//! attachment + record → plan() ──► Skip
//!                              ├─► LocalError (no network)
//!                              └─► Remote { token, request } ──► RemoteRenderer
//!                                        │                            │
//!                                        └── accept(token)? ◄── response
//! ```

mod attachment;
mod errors;
mod renderer;
mod shortcode;

pub use attachment::{AttachmentError, AttachmentSnapshot};
pub use errors::PreviewError;
pub use renderer::{PreviewJob, PreviewRenderer, PreviewState, RenderPlan, RequestToken};
pub use shortcode::{PreviewMarkup, RemoteRenderer, ShortcodeRequest};
