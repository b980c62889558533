//! # Mediakit Schema
//!
//! Declarative field schemas for media widget instances.
//!
//! A [`Schema`] is an ordered mapping from field name to a
//! [`FieldDescriptor`]: value type, default, optional enumerated values,
//! and a sanitizer. It is pure data plus a validation function — no
//! dependencies on the rest of the engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ schema: field descriptors + validate        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ store: sanitize on every write              │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: editing model + control             │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Schema is immutable**: built once per widget type, never mutated
//! 2. **Composition over inheritance**: subtype schemas are an ordered
//!    merge of the base fields plus additions, override wins
//! 3. **Sanitize at the boundary**: `validate` is the only path from raw
//!    data to a persisted record

mod errors;
mod media;
mod record;
mod sanitize;
mod schema;
mod value;

pub use errors::SchemaError;
pub use media::{base_media_schema, video_schema, LINK_TYPES, PRELOAD_MODES};
pub use record::InstanceRecord;
pub use sanitize::Sanitizer;
pub use schema::{ExportedField, FieldDescriptor, Schema, SchemaBuilder, SchemaExport};
pub use value::{FieldType, FieldValue};
