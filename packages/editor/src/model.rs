//! # Editing Model
//!
//! In-memory mirror of one instance record, owned exclusively by one
//! control for the lifetime of one editing session.
//!
//! Writes store the raw value without sanitizing eagerly — sanitization
//! is deferred to save time so interactive typing is not fought by the
//! sanitizer — but value-type coercion (checkbox toggle to boolean,
//! numeric text to integer) is enforced on every `set`. Each successful
//! `set` notifies subscribers synchronously, in call order, with no
//! batching or reordering.

use mediakit_schema::{FieldValue, InstanceRecord, Schema};

use crate::errors::EditorError;

/// Change notification carrying the field name and its new raw value
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub field: String,
    pub value: FieldValue,
}

type Subscriber = Box<dyn FnMut(&FieldChange) + Send>;

pub struct EditingModel {
    schema: Schema,
    values: InstanceRecord,
    subscribers: Vec<Subscriber>,
}

impl EditingModel {
    /// Build from a loaded record, filling any schema field the record is
    /// missing with its default.
    pub fn new(schema: Schema, loaded: InstanceRecord) -> Self {
        let mut values = schema.defaults();
        for (field, value) in loaded.iter() {
            if schema.field(field).is_some() {
                values.insert(field.clone(), value.clone());
            }
        }
        Self {
            schema,
            values,
            subscribers: Vec::new(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Set a field to a raw (unsanitized) value.
    ///
    /// The value is coerced to the field's declared type; a value with no
    /// sensible coercion is a [`EditorError::TypeMismatch`]. Subscribers
    /// are notified before this returns.
    pub fn set(&mut self, field: &str, value: FieldValue) -> Result<(), EditorError> {
        let descriptor = self
            .schema
            .field(field)
            .ok_or_else(|| EditorError::UnknownField {
                field: field.to_string(),
            })?;

        let coerced = value
            .coerce(descriptor.value_type)
            .ok_or_else(|| EditorError::TypeMismatch {
                field: field.to_string(),
            })?;

        self.values.insert(field.to_string(), coerced.clone());

        let change = FieldChange {
            field: field.to_string(),
            value: coerced,
        };
        for subscriber in &mut self.subscribers {
            subscriber(&change);
        }
        Ok(())
    }

    /// Observe field changes; delivery is synchronous within `set`.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&FieldChange) + Send + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Snapshot of the current raw values; exactly what gets handed to
    /// the instance store on save.
    pub fn to_record(&self) -> InstanceRecord {
        self.values.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediakit_schema::video_schema;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_missing_fields_fill_from_defaults() {
        let mut loaded = InstanceRecord::new();
        loaded.insert("url", "https://x.test/v.mp4");

        let model = EditingModel::new(video_schema(), loaded);
        assert_eq!(model.get("url"), Some(&FieldValue::from("https://x.test/v.mp4")));
        assert_eq!(model.get("preload"), Some(&FieldValue::from("none")));
        assert_eq!(model.get("autoplay"), Some(&FieldValue::Bool(false)));
    }

    #[test]
    fn test_set_keeps_raw_value() {
        let mut model = EditingModel::new(video_schema(), InstanceRecord::new());
        // Untrimmed text survives until save-time sanitization.
        model.set("title", FieldValue::from("  draft title  ")).unwrap();
        assert_eq!(model.get("title"), Some(&FieldValue::from("  draft title  ")));
    }

    #[test]
    fn test_set_coerces_checkbox_to_boolean() {
        let mut model = EditingModel::new(video_schema(), InstanceRecord::new());
        model.set("autoplay", FieldValue::from("on")).unwrap();
        assert_eq!(model.get("autoplay"), Some(&FieldValue::Bool(true)));
    }

    #[test]
    fn test_set_unknown_field_errors() {
        let mut model = EditingModel::new(video_schema(), InstanceRecord::new());
        let err = model.set("nope", FieldValue::from("x")).unwrap_err();
        assert!(matches!(err, EditorError::UnknownField { .. }));
    }

    #[test]
    fn test_set_uncoercible_value_errors() {
        let mut model = EditingModel::new(video_schema(), InstanceRecord::new());
        let err = model
            .set("attachment_id", FieldValue::from("not-a-number"))
            .unwrap_err();
        assert!(matches!(err, EditorError::TypeMismatch { .. }));
    }

    #[test]
    fn test_change_events_synchronous_in_call_order() {
        let mut model = EditingModel::new(video_schema(), InstanceRecord::new());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        model.subscribe(move |change| {
            sink.lock().unwrap().push(change.field.clone());
        });

        model.set("loop", FieldValue::Bool(true)).unwrap();
        model.set("preload", FieldValue::from("auto")).unwrap();
        // Delivery happened inside `set`, not on some later tick.
        assert_eq!(*seen.lock().unwrap(), vec!["loop", "preload"]);
    }

    #[test]
    fn test_failed_set_emits_nothing() {
        let mut model = EditingModel::new(video_schema(), InstanceRecord::new());
        let seen = Arc::new(Mutex::new(0usize));

        let sink = Arc::clone(&seen);
        model.subscribe(move |_| {
            *sink.lock().unwrap() += 1;
        });

        let _ = model.set("attachment_id", FieldValue::from("junk"));
        assert_eq!(*seen.lock().unwrap(), 0);
    }
}
