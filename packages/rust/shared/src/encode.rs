//! Deterministic JSON encoding for dataset artifacts.
//!
//! Two variants:
//! - [`to_compact_json`] — the on-disk form: compact separators, no pretty
//!   printing, insertion-ordered object keys, non-ASCII preserved literally.
//! - [`to_inline_json`] — the same bytes made safe to embed as a literal
//!   inside an HTML `<script>` block.
//!
//! Determinism is a hard requirement: two invocations on identical input
//! must produce byte-identical output, so downstream consumers can diff and
//! cache the artifacts.

use serde::Serialize;

use crate::error::{ChempackError, Result};

/// Serialize `value` compactly with stable (insertion-order) keys.
pub fn to_compact_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| ChempackError::encoding(e.to_string()))
}

/// Serialize `value` for embedding inside a `<script>` element.
///
/// A raw JSON dump is not automatically script-safe: a string value
/// containing `</script` (or even `<!--`) would terminate the enclosing
/// script context early. Escaping every `/` that follows `<` as the legal
/// JSON escape `\/` removes the whole class. U+2028/U+2029 are escaped too,
/// since they are line terminators in JavaScript source but not in JSON.
pub fn to_inline_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(make_inline_safe(&to_compact_json(value)?))
}

fn make_inline_safe(json: &str) -> String {
    // In compact JSON every `<` lives inside a string literal, so rewriting
    // `</` to `<\/` changes encoding only, never the decoded value.
    json.replace("</", r"<\/")
        .replace('\u{2028}', r"\u2028")
        .replace('\u{2029}', r"\u2029")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Sample {
        name: String,
        factor: f64,
    }

    #[test]
    fn compact_has_no_incidental_whitespace() {
        let json = to_compact_json(&Sample { name: "bar".into(), factor: 1.0 }).unwrap();
        assert_eq!(json, r#"{"name":"bar","factor":1.0}"#);
    }

    #[test]
    fn compact_is_deterministic() {
        let value = Sample { name: "Ω·m".into(), factor: 2.5 };
        let a = to_compact_json(&value).unwrap();
        let b = to_compact_json(&value).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn non_ascii_kept_literal() {
        let json = to_compact_json(&Sample { name: "Å·°C·µm".into(), factor: 1.0 }).unwrap();
        assert!(json.contains("Å·°C·µm"));
        assert!(!json.contains(r"\u00"));
    }

    #[test]
    fn inline_escapes_script_close() {
        let json =
            to_inline_json(&Sample { name: "</script><script>alert(1)".into(), factor: 0.0 })
                .unwrap();
        assert!(!json.contains("</script"));
        assert!(json.contains(r"<\/script"));
        // Still valid JSON decoding to the original text.
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["name"], "</script><script>alert(1)");
    }

    #[test]
    fn inline_escapes_js_line_separators() {
        let json = to_inline_json(&Sample { name: "a\u{2028}b".into(), factor: 0.0 }).unwrap();
        assert!(json.contains(r"\u2028"));
        assert!(!json.contains('\u{2028}'));
    }

    #[test]
    fn inline_leaves_plain_payloads_untouched() {
        let value = Sample { name: "J/(mol·K)".into(), factor: 8.314 };
        assert_eq!(to_inline_json(&value).unwrap(), to_compact_json(&value).unwrap());
    }
}
