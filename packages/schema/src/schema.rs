//! Schema definition and validation
//!
//! ## Validation Semantics
//!
//! For each declared field:
//! - present in the raw record → coerce to the declared type, sanitize,
//!   then enum-check; a miss is `InvalidFieldValue` (the caller
//!   substitutes the default, never the rejected value)
//! - absent → the default
//! - unknown raw fields are dropped silently (forward-compatibility:
//!   extra data does not error)
//!
//! ## Composition Semantics
//!
//! A subtype schema is the base schema's fields plus its own additions:
//! ordered merge, override wins on key collision, key order is
//! base-then-new. Overrides may not change an inherited field's type.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::SchemaError;
use crate::record::InstanceRecord;
use crate::sanitize::Sanitizer;
use crate::value::{FieldType, FieldValue};

/// Everything the schema knows about one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub value_type: FieldType,
    pub default: FieldValue,
    /// Enumerated values; only meaningful for string fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
    pub sanitizer: Sanitizer,
}

impl FieldDescriptor {
    pub fn boolean(default: bool) -> Self {
        Self {
            value_type: FieldType::Boolean,
            default: FieldValue::Bool(default),
            allowed_values: None,
            sanitizer: Sanitizer::Passthrough,
        }
    }

    pub fn integer(default: i64) -> Self {
        Self {
            value_type: FieldType::Integer,
            default: FieldValue::Int(default),
            allowed_values: None,
            sanitizer: Sanitizer::NonNegativeInt,
        }
    }

    pub fn string(default: &str) -> Self {
        Self {
            value_type: FieldType::String,
            default: FieldValue::Str(default.to_string()),
            allowed_values: None,
            sanitizer: Sanitizer::Text,
        }
    }

    /// String field restricted to an enumerated set
    pub fn string_enum(values: &[&str], default: &str) -> Self {
        debug_assert!(values.contains(&default));
        Self {
            value_type: FieldType::String,
            default: FieldValue::Str(default.to_string()),
            allowed_values: Some(values.iter().map(|v| v.to_string()).collect()),
            sanitizer: Sanitizer::Text,
        }
    }

    pub fn with_sanitizer(mut self, sanitizer: Sanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }
}

/// Ordered, immutable field schema for one widget type
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    fields: IndexMap<String, FieldDescriptor>,
}

/// Incremental construction; the only way to build a [`Schema`]
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: IndexMap<String, FieldDescriptor>,
}

impl SchemaBuilder {
    pub fn field(mut self, name: &str, descriptor: FieldDescriptor) -> Self {
        self.fields.insert(name.to_string(), descriptor);
        self
    }

    pub fn build(self) -> Schema {
        Schema { fields: self.fields }
    }
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate and sanitize a raw record into a persistable one.
    pub fn validate(&self, raw: &InstanceRecord) -> Result<InstanceRecord, SchemaError> {
        let mut sanitized = InstanceRecord::new();

        for (name, descriptor) in &self.fields {
            let value = match raw.get(name) {
                Some(raw_value) => {
                    let coerced = raw_value
                        .clone()
                        .coerce(descriptor.value_type)
                        .ok_or_else(|| SchemaError::InvalidFieldValue {
                            field: name.clone(),
                        })?;
                    let clean = descriptor.sanitizer.apply(coerced);

                    if let Some(allowed) = &descriptor.allowed_values {
                        let candidate = clean.as_str().unwrap_or_default();
                        if !allowed.iter().any(|v| v == candidate) {
                            return Err(SchemaError::InvalidFieldValue {
                                field: name.clone(),
                            });
                        }
                    }
                    clean
                }
                None => descriptor.default.clone(),
            };
            sanitized.insert(name.clone(), value);
        }

        // Unknown fields in `raw` are dropped by construction: only
        // declared fields were copied over.
        Ok(sanitized)
    }

    /// A record holding every field's default
    pub fn defaults(&self) -> InstanceRecord {
        self.fields
            .iter()
            .map(|(name, descriptor)| (name.clone(), descriptor.default.clone()))
            .collect()
    }

    /// Compose a subtype schema from this one plus additions.
    ///
    /// Ordered merge: base fields keep their position, overridden
    /// descriptors replace in place, new fields append after.
    pub fn extend(&self, additions: &Schema) -> Result<Schema, SchemaError> {
        let mut fields = self.fields.clone();

        for (name, descriptor) in &additions.fields {
            if let Some(existing) = fields.get(name) {
                if existing.value_type != descriptor.value_type {
                    return Err(SchemaError::IncompatibleOverride {
                        field: name.clone(),
                    });
                }
            }
            // IndexMap keeps the original position for existing keys,
            // which is exactly the base-then-new ordering rule.
            fields.insert(name.clone(), descriptor.clone());
        }

        Ok(Schema { fields })
    }

    /// Field metadata handed to the editing control at construction
    pub fn export(&self) -> SchemaExport {
        SchemaExport(
            self.fields
                .iter()
                .map(|(name, descriptor)| {
                    (
                        name.clone(),
                        ExportedField {
                            value_type: descriptor.value_type,
                            default: descriptor.default.clone(),
                            allowed_values: descriptor.allowed_values.clone(),
                        },
                    )
                })
                .collect(),
        )
    }
}

/// Per-field metadata exposed outside the schema crate (no sanitizers)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedField {
    #[serde(rename = "type")]
    pub value_type: FieldType,
    pub default: FieldValue,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
}

/// Exported schema metadata, one entry per field, in schema order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaExport(IndexMap<String, ExportedField>);

impl SchemaExport {
    pub fn get(&self, field: &str) -> Option<&ExportedField> {
        self.0.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ExportedField)> {
        self.0.iter()
    }
}
