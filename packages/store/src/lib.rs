//! # Mediakit Store
//!
//! The instance store owns the canonical, persisted record for each
//! widget placement. Every write path runs the widget's schema, so
//! nothing unsanitized ever reaches persistence; every load yields a
//! fully sanitized record, fabricated from defaults when nothing was
//! persisted yet.
//!
//! Two backends:
//! - [`MemoryStore`]: wholesale map replacement, for tests and embedding
//! - [`FileStore`]: one JSON document per instance, atomic via
//!   write-temp-then-rename

mod errors;
mod file;
mod memory;
mod store;

pub use errors::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::{InstanceStore, SaveOutcome};
