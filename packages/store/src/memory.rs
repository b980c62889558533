//! In-memory instance store

use std::collections::HashMap;

use mediakit_schema::{InstanceRecord, Schema};

use crate::errors::StoreError;
use crate::store::{sanitize_candidate, InstanceStore, SaveOutcome};

/// Map-backed store. Saves replace the whole entry, so loads always see
/// one consistent record.
pub struct MemoryStore {
    schema: Schema,
    records: HashMap<String, InstanceRecord>,
}

impl MemoryStore {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            records: HashMap::new(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }
}

impl InstanceStore for MemoryStore {
    fn load(&self, id: &str) -> Result<InstanceRecord, StoreError> {
        match self.records.get(id) {
            // Persisted records went through validate on save, but the
            // load contract re-asserts it so the invariant never depends
            // on who populated the map.
            Some(record) => {
                let (sanitized, _) = sanitize_candidate(&self.schema, record);
                Ok(sanitized)
            }
            None => Ok(self.schema.defaults()),
        }
    }

    fn save(&mut self, id: &str, candidate: &InstanceRecord) -> Result<SaveOutcome, StoreError> {
        let (record, reverted) = sanitize_candidate(&self.schema, candidate);
        tracing::debug!(id = %id, reverted = reverted.len(), "saving instance record");
        self.records.insert(id.to_string(), record.clone());
        Ok(SaveOutcome { record, reverted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediakit_schema::{video_schema, FieldValue};

    #[test]
    fn test_load_fabricates_defaults() {
        let store = MemoryStore::new(video_schema());
        let record = store.load("widget-1").unwrap();
        assert_eq!(record, video_schema().defaults());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let schema = video_schema();
        let mut store = MemoryStore::new(schema.clone());

        let mut candidate = InstanceRecord::new();
        candidate.insert("attachment_id", 12i64);
        candidate.insert("url", "https://example.com/v.mp4");
        candidate.insert("autoplay", true);

        store.save("widget-1", &candidate).unwrap();
        let loaded = store.load("widget-1").unwrap();
        assert_eq!(loaded, schema.validate(&candidate).unwrap());
    }

    #[test]
    fn test_bogus_enum_persists_default() {
        let mut store = MemoryStore::new(video_schema());

        let mut candidate = InstanceRecord::new();
        candidate.insert("preload", "bogus");

        let outcome = store.save("widget-1", &candidate).unwrap();
        assert_eq!(outcome.reverted, vec!["preload".to_string()]);

        let loaded = store.load("widget-1").unwrap();
        assert_eq!(loaded.get("preload"), Some(&FieldValue::from("none")));
    }

    #[test]
    fn test_save_is_idempotent() {
        let mut store = MemoryStore::new(video_schema());

        let mut candidate = InstanceRecord::new();
        candidate.insert("loop", true);

        let first = store.save("widget-1", &candidate).unwrap();
        let second = store.save("widget-1", &first.record).unwrap();
        assert_eq!(first.record, second.record);
        assert!(second.reverted.is_empty());
    }
}
