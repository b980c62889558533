//! Built-in field sanitizers
//!
//! Sanitizers are pure value → value functions applied at validate time,
//! never while the user is typing. Every sanitizer is idempotent:
//! `apply(apply(v)) == apply(v)`, which is what makes `Schema::validate`
//! idempotent as a whole.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::value::FieldValue;

// Block-level markup that never survives rich text sanitization.
static SCRIPT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script>").expect("valid regex"));
static STYLE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style>").expect("valid regex"));
// Inline event handlers inside any remaining tag.
static ON_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\s+on[a-z]+\s*=\s*("[^"]*"|'[^']*'|[^\s>]+)"#).expect("valid regex"));

/// Named sanitizer attached to a field descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sanitizer {
    /// Value passes through unchanged
    Passthrough,
    /// Plain text: control characters stripped, surrounding whitespace trimmed
    Text,
    /// Markup allowed, but script/style blocks and inline event handlers removed
    RichText,
    /// http(s) URLs only; anything else collapses to the empty string
    Url,
    /// Integers clamped to zero or above
    NonNegativeInt,
}

impl Sanitizer {
    /// Apply this sanitizer to a value.
    ///
    /// String sanitizers leave non-string values untouched (type
    /// enforcement is the validator's job, not the sanitizer's).
    pub fn apply(&self, value: FieldValue) -> FieldValue {
        match (self, value) {
            (Sanitizer::Passthrough, v) => v,

            (Sanitizer::Text, FieldValue::Str(s)) => FieldValue::Str(sanitize_text(&s)),
            (Sanitizer::RichText, FieldValue::Str(s)) => FieldValue::Str(sanitize_rich_text(&s)),
            (Sanitizer::Url, FieldValue::Str(s)) => FieldValue::Str(sanitize_url(&s)),

            (Sanitizer::NonNegativeInt, FieldValue::Int(n)) => FieldValue::Int(n.max(0)),

            (_, v) => v,
        }
    }
}

fn sanitize_text(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

fn sanitize_rich_text(input: &str) -> String {
    let stripped = SCRIPT_BLOCK.replace_all(input, "");
    let stripped = STYLE_BLOCK.replace_all(&stripped, "");
    ON_ATTR.replace_all(&stripped, "").into_owned()
}

fn sanitize_url(input: &str) -> String {
    let trimmed = input.trim();
    let lowered = trimmed.to_ascii_lowercase();
    if lowered.starts_with("http://") || lowered.starts_with("https://") {
        trimmed.to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_strips_control_chars() {
        let out = Sanitizer::Text.apply(FieldValue::from("  a\u{0000}b\tc  "));
        assert_eq!(out, FieldValue::from("abc"));
    }

    #[test]
    fn test_rich_text_strips_script_and_handlers() {
        let input = r#"<p onclick="evil()">hi</p><script>alert(1)</script>"#;
        let out = Sanitizer::RichText.apply(FieldValue::from(input));
        assert_eq!(out, FieldValue::from("<p>hi</p>"));
    }

    #[test]
    fn test_rich_text_keeps_benign_markup() {
        let input = "<em>caption</em> with <a href=\"https://x.test\">link</a>";
        let out = Sanitizer::RichText.apply(FieldValue::from(input));
        assert_eq!(out, FieldValue::from(input));
    }

    #[test]
    fn test_url_scheme_whitelist() {
        assert_eq!(
            Sanitizer::Url.apply(FieldValue::from("https://example.com/v.mp4")),
            FieldValue::from("https://example.com/v.mp4")
        );
        assert_eq!(
            Sanitizer::Url.apply(FieldValue::from("javascript:alert(1)")),
            FieldValue::from("")
        );
    }

    #[test]
    fn test_non_negative_int() {
        assert_eq!(
            Sanitizer::NonNegativeInt.apply(FieldValue::Int(-3)),
            FieldValue::Int(0)
        );
        assert_eq!(
            Sanitizer::NonNegativeInt.apply(FieldValue::Int(7)),
            FieldValue::Int(7)
        );
    }

    #[test]
    fn test_sanitizers_are_idempotent() {
        let cases = [
            (Sanitizer::Text, FieldValue::from("  spaced  ")),
            (
                Sanitizer::RichText,
                FieldValue::from("<p onclick='x'>t</p><script>a</script>"),
            ),
            (Sanitizer::Url, FieldValue::from("ftp://nope")),
            (Sanitizer::NonNegativeInt, FieldValue::Int(-1)),
        ];
        for (sanitizer, value) in cases {
            let once = sanitizer.apply(value);
            let twice = sanitizer.apply(once.clone());
            assert_eq!(once, twice);
        }
    }
}
