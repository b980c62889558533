//! File-backed instance store
//!
//! One JSON document per instance id under a root directory. Saves write
//! a temp file in the same directory and rename it over the target, so a
//! concurrent load observes either the fully-old or fully-new record.

use std::fs;
use std::path::{Path, PathBuf};

use mediakit_schema::{InstanceRecord, Schema};

use crate::errors::StoreError;
use crate::store::{sanitize_candidate, InstanceStore, SaveOutcome};

pub struct FileStore {
    schema: Schema,
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(schema: Schema, root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { schema, root })
    }

    fn record_path(&self, id: &str) -> PathBuf {
        // Ids are widget placement ids, not user input, but keep them
        // from escaping the root regardless.
        let safe: String = id
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.root.join(format!("{}.json", safe))
    }

    fn write_atomic(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl InstanceStore for FileStore {
    fn load(&self, id: &str) -> Result<InstanceRecord, StoreError> {
        let path = self.record_path(id);
        if !path.exists() {
            return Ok(self.schema.defaults());
        }

        let bytes = fs::read(&path)?;
        let raw: InstanceRecord = serde_json::from_slice(&bytes)?;
        // Disk content may predate a schema change or have been edited by
        // hand; loads re-sanitize so callers never see an invalid record.
        let (record, reverted) = sanitize_candidate(&self.schema, &raw);
        if !reverted.is_empty() {
            tracing::warn!(id = %id, ?reverted, "persisted record required sanitization on load");
        }
        Ok(record)
    }

    fn save(&mut self, id: &str, candidate: &InstanceRecord) -> Result<SaveOutcome, StoreError> {
        let (record, reverted) = sanitize_candidate(&self.schema, candidate);
        let bytes = serde_json::to_vec_pretty(&record)?;
        self.write_atomic(&self.record_path(id), &bytes)?;
        tracing::debug!(id = %id, reverted = reverted.len(), "persisted instance record");
        Ok(SaveOutcome { record, reverted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediakit_schema::{video_schema, FieldValue};

    #[test]
    fn test_load_missing_fabricates_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(video_schema(), dir.path()).unwrap();
        assert_eq!(store.load("widget-9").unwrap(), video_schema().defaults());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let schema = video_schema();
        let mut store = FileStore::open(schema.clone(), dir.path()).unwrap();

        let mut candidate = InstanceRecord::new();
        candidate.insert("attachment_id", 5i64);
        candidate.insert("url", "https://example.com/clip.mp4");
        candidate.insert("preload", "metadata");

        store.save("widget-2", &candidate).unwrap();
        let loaded = store.load("widget-2").unwrap();
        assert_eq!(loaded, schema.validate(&candidate).unwrap());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(video_schema(), dir.path()).unwrap();

        store.save("widget-3", &InstanceRecord::new()).unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .filter(|name| name.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_hand_edited_record_sanitized_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(video_schema(), dir.path()).unwrap();
        store.save("widget-4", &InstanceRecord::new()).unwrap();

        // Corrupt the enum field on disk.
        let path = dir.path().join("widget-4.json");
        let text = fs::read_to_string(&path)
            .unwrap()
            .replace("\"none\"", "\"bogus\"");
        fs::write(&path, text).unwrap();

        let loaded = store.load("widget-4").unwrap();
        assert_eq!(loaded.get("preload"), Some(&FieldValue::from("none")));
    }

    #[test]
    fn test_identical_resave_produces_identical_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(video_schema(), dir.path()).unwrap();

        let mut candidate = InstanceRecord::new();
        candidate.insert("loop", true);

        store.save("widget-5", &candidate).unwrap();
        let first = fs::read(dir.path().join("widget-5.json")).unwrap();
        store.save("widget-5", &candidate).unwrap();
        let second = fs::read(dir.path().join("widget-5.json")).unwrap();
        assert_eq!(first, second);
    }
}
