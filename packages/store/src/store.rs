//! Store contract and the shared sanitize-with-revert pass

use mediakit_schema::{InstanceRecord, Schema, SchemaError};

use crate::errors::StoreError;

/// Result of a save: the record as persisted, plus any fields that were
/// reverted to their defaults because the candidate value failed
/// validation. Partial-failure policy: one bad field never blocks the
/// rest of the save.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOutcome {
    pub record: InstanceRecord,
    pub reverted: Vec<String>,
}

/// Canonical persistence for widget instance records.
///
/// `load` always returns a fully sanitized record; `save` validates the
/// candidate and persists atomically — a concurrent load sees either the
/// fully-old or fully-new record, never a partial write.
pub trait InstanceStore {
    fn load(&self, id: &str) -> Result<InstanceRecord, StoreError>;

    fn save(&mut self, id: &str, candidate: &InstanceRecord) -> Result<SaveOutcome, StoreError>;
}

/// Validate `candidate`, substituting the default for every field that
/// fails its check. Returns the sanitized record and the reverted field
/// names in schema order of failure.
pub(crate) fn sanitize_candidate(
    schema: &Schema,
    candidate: &InstanceRecord,
) -> (InstanceRecord, Vec<String>) {
    let mut working = candidate.clone();
    let mut reverted = Vec::new();

    loop {
        match schema.validate(&working) {
            Ok(record) => return (record, reverted),
            Err(SchemaError::InvalidFieldValue { field }) => {
                let default = schema
                    .field(&field)
                    .map(|descriptor| descriptor.default.clone());
                match default {
                    Some(value) => {
                        tracing::warn!(field = %field, "invalid field value, reverting to default");
                        working.insert(field.clone(), value);
                        reverted.push(field);
                    }
                    // Validate only reports declared fields; treat an
                    // unknown one as already handled.
                    None => {
                        working.remove(&field);
                    }
                }
            }
            Err(SchemaError::IncompatibleOverride { .. }) => {
                // Composition errors cannot arise from validate; fall back
                // to pure defaults rather than looping forever.
                return (schema.defaults(), reverted);
            }
        }
    }
}
