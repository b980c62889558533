//! Built-in media schemas
//!
//! The base media schema covers every media widget kind; the video schema
//! extends it with playback fields. Composition goes through
//! [`Schema::extend`], not inheritance.

use crate::sanitize::Sanitizer;
use crate::schema::{FieldDescriptor, Schema};

/// Allowed `preload` modes for video playback
pub const PRELOAD_MODES: &[&str] = &["none", "auto", "metadata"];

/// Allowed `link_type` values for how the rendered media links out
pub const LINK_TYPES: &[&str] = &["none", "file", "post", "custom"];

/// Fields shared by every media widget kind
pub fn base_media_schema() -> Schema {
    Schema::builder()
        .field("attachment_id", FieldDescriptor::integer(0))
        .field(
            "url",
            FieldDescriptor::string("").with_sanitizer(Sanitizer::Url),
        )
        .field("title", FieldDescriptor::string(""))
        .build()
}

/// The video widget's schema: base media fields plus playback controls
pub fn video_schema() -> Schema {
    let additions = Schema::builder()
        .field("autoplay", FieldDescriptor::boolean(false))
        .field("loop", FieldDescriptor::boolean(false))
        .field(
            "preload",
            FieldDescriptor::string_enum(PRELOAD_MODES, "none"),
        )
        .field(
            "caption",
            FieldDescriptor::string("").with_sanitizer(Sanitizer::RichText),
        )
        .field(
            "description",
            FieldDescriptor::string("").with_sanitizer(Sanitizer::RichText),
        )
        .field(
            "link_type",
            FieldDescriptor::string_enum(LINK_TYPES, "none"),
        )
        .build();

    base_media_schema()
        .extend(&additions)
        .expect("video additions never retype base fields")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::InstanceRecord;
    use crate::value::FieldValue;

    #[test]
    fn test_video_schema_field_order() {
        let schema = video_schema();
        let names: Vec<_> = schema.field_names().collect();
        assert_eq!(
            names,
            vec![
                "attachment_id",
                "url",
                "title",
                "autoplay",
                "loop",
                "preload",
                "caption",
                "description",
                "link_type",
            ]
        );
    }

    #[test]
    fn test_video_defaults() {
        let defaults = video_schema().defaults();
        assert_eq!(defaults.get("attachment_id"), Some(&FieldValue::Int(0)));
        assert_eq!(defaults.get("preload"), Some(&FieldValue::from("none")));
        assert_eq!(defaults.get("autoplay"), Some(&FieldValue::Bool(false)));
    }

    #[test]
    fn test_bogus_preload_rejected() {
        let schema = video_schema();
        let mut raw = InstanceRecord::new();
        raw.insert("preload", "bogus");
        assert!(schema.validate(&raw).is_err());
    }
}
