//! Response Parser: recovers an `AnalysisResult` from raw model output.
//!
//! The model is not a deterministic wire peer. A bare object is parsed as is.
//! Otherwise the JSON payload is cut out of a fenced block, or out of the
//! prose around it, and must then be strict JSON. Broken output is rejected
//! with the raw text kept for display.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::analysis::prompts::ResponseSchema;

const FENCE: &str = "```";
pub const SCORE_NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub relevance_score: String,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("Model response is not a valid JSON object: {reason}")]
pub struct MalformedResponse {
    /// The original response, unmodified.
    pub raw: String,
    pub reason: String,
}

pub fn parse(raw: &str, schema: &ResponseSchema) -> Result<AnalysisResult, MalformedResponse> {
    let payload = json_payload(raw);

    let value: Value = serde_json::from_str(payload).map_err(|e| MalformedResponse {
        raw: raw.to_string(),
        reason: e.to_string(),
    })?;

    let Value::Object(object) = value else {
        return Err(MalformedResponse {
            raw: raw.to_string(),
            reason: "top-level value is not an object".to_string(),
        });
    };

    Ok(AnalysisResult {
        relevance_score: read_score(&object, schema.score_key),
        missing_keywords: read_list(&object, schema.keywords_key),
        suggestions: read_list(&object, schema.suggestions_key),
    })
}

/// Picks the slice of the response that should hold the JSON value.
/// Text that already starts like JSON is never rewritten.
fn json_payload(raw: &str) -> &str {
    let text = raw.trim();
    if text.starts_with('{') || text.starts_with('[') {
        return text;
    }
    fenced_block(text)
        .or_else(|| outer_braces(text))
        .unwrap_or(text)
}

/// Contents of the first fenced block, without its language tag. The block
/// runs to the last fence marker, or to the end when it is never closed.
fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find(FENCE)?;
    let after = &text[open + FENCE.len()..];
    let tag_len = after
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(after.len());
    let body = &after[tag_len..];
    let body = match body.rfind(FENCE) {
        Some(close) => &body[..close],
        None => body,
    };
    Some(body.trim())
}

/// From the first `{` to the last `}`, for objects wrapped in unfenced prose.
fn outer_braces(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn read_score(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => SCORE_NOT_AVAILABLE.to_string(),
    }
}

fn read_list(object: &Map<String, Value>, key: &str) -> Vec<String> {
    match object.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BARE: &str =
        r#"{"relevance_score":"7","missing_keywords":[],"suggestions":["Add metrics"]}"#;

    fn parse_default(raw: &str) -> Result<AnalysisResult, MalformedResponse> {
        parse(raw, &ResponseSchema::default())
    }

    #[test]
    fn test_fenced_with_json_tag_matches_bare() {
        let fenced = format!("```json\n{BARE}\n```");
        assert_eq!(parse_default(&fenced).unwrap(), parse_default(BARE).unwrap());
    }

    #[test]
    fn test_fenced_without_tag_matches_bare() {
        let fenced = format!("```\n{BARE}\n```");
        assert_eq!(parse_default(&fenced).unwrap(), parse_default(BARE).unwrap());
    }

    #[test]
    fn test_fenced_with_uppercase_tag_and_padding() {
        let fenced = format!("  \n```JSON\n{BARE}\n```  \n");
        let result = parse_default(&fenced).unwrap();
        assert_eq!(result.relevance_score, "7");
        assert_eq!(result.suggestions, vec!["Add metrics"]);
    }

    #[test]
    fn test_fenced_on_a_single_line() {
        let fenced = format!("```json{BARE}```");
        assert_eq!(parse_default(&fenced).unwrap(), parse_default(BARE).unwrap());
    }

    #[test]
    fn test_bare_object_fields() {
        let result = parse_default(BARE).unwrap();
        assert_eq!(result.relevance_score, "7");
        assert!(result.missing_keywords.is_empty());
        assert_eq!(result.suggestions, vec!["Add metrics"]);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let result = parse_default(r#"{"suggestions":["Quantify impact"]}"#).unwrap();
        assert_eq!(result.relevance_score, "N/A");
        assert!(result.missing_keywords.is_empty());
        assert_eq!(result.suggestions, vec!["Quantify impact"]);
    }

    #[test]
    fn test_empty_object_is_all_defaults() {
        let result = parse_default("{}").unwrap();
        assert_eq!(result.relevance_score, "N/A");
        assert!(result.missing_keywords.is_empty());
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_numeric_score_is_stringified() {
        let result = parse_default(r#"{"relevance_score": 8}"#).unwrap();
        assert_eq!(result.relevance_score, "8");
        let result = parse_default(r#"{"relevance_score": 6.5}"#).unwrap();
        assert_eq!(result.relevance_score, "6.5");
    }

    #[test]
    fn test_null_or_blank_score_is_not_available() {
        assert_eq!(parse_default(r#"{"relevance_score": null}"#).unwrap().relevance_score, "N/A");
        assert_eq!(parse_default(r#"{"relevance_score": "  "}"#).unwrap().relevance_score, "N/A");
    }

    #[test]
    fn test_extra_keys_are_ignored() {
        let raw = r#"{"relevance_score":"5/10","summary":"meh","missing_keywords":["Kafka"]}"#;
        let result = parse_default(raw).unwrap();
        assert_eq!(result.relevance_score, "5/10");
        assert_eq!(result.missing_keywords, vec!["Kafka"]);
    }

    #[test]
    fn test_mangled_key_name_is_not_read() {
        let raw = r#"{" 🧩 missing_keywords":["Rust"]}"#;
        assert!(parse_default(raw).unwrap().missing_keywords.is_empty());
    }

    #[test]
    fn test_list_items_are_kept_in_order_and_non_scalars_skipped() {
        let raw = r#"{"missing_keywords":["Rust", 3, {"x":1}, null, "Tokio"]}"#;
        let result = parse_default(raw).unwrap();
        assert_eq!(result.missing_keywords, vec!["Rust", "3", "Tokio"]);
    }

    #[test]
    fn test_single_string_list_becomes_one_item() {
        let result = parse_default(r#"{"suggestions":"Lead with impact"}"#).unwrap();
        assert_eq!(result.suggestions, vec!["Lead with impact"]);
    }

    #[test]
    fn test_prose_without_json_is_malformed_and_raw_preserved() {
        let raw = "Sure, here's my analysis: the resume is decent.";
        let err = parse_default(raw).unwrap_err();
        assert_eq!(err.raw, raw);
    }

    #[test]
    fn test_leading_prose_before_fence_is_dropped() {
        let raw = format!("Here is the analysis:\n```json\n{BARE}\n```");
        assert_eq!(parse_default(&raw).unwrap(), parse_default(BARE).unwrap());
    }

    #[test]
    fn test_prose_on_both_sides_of_fence_is_dropped() {
        let raw = format!("Here you go:\n```json\n{BARE}\n```\nLet me know if you need more.");
        assert_eq!(parse_default(&raw).unwrap(), parse_default(BARE).unwrap());
    }

    #[test]
    fn test_unfenced_object_inside_prose() {
        let raw = format!("Analysis follows. {BARE} Hope this helps!");
        assert_eq!(parse_default(&raw).unwrap(), parse_default(BARE).unwrap());
    }

    #[test]
    fn test_backticks_inside_bare_string_value_survive() {
        let raw = r#"{"suggestions":["Show code with ```rust blocks"]}"#;
        let result = parse_default(raw).unwrap();
        assert_eq!(result.suggestions, vec!["Show code with ```rust blocks"]);
    }

    #[test]
    fn test_backticks_inside_fenced_string_value_survive() {
        let raw = "```json\n{\"suggestions\":[\"Show code with ```rust blocks\"]}\n```";
        let result = parse_default(raw).unwrap();
        assert_eq!(result.suggestions, vec!["Show code with ```rust blocks"]);
    }

    #[test]
    fn test_truncated_json_is_malformed() {
        let raw = r#"```json
{"relevance_score":"7","missing_keywords":["Rust""#;
        assert_eq!(parse_default(raw).unwrap_err().raw, raw);
    }

    #[test]
    fn test_non_object_json_is_malformed() {
        let err = parse_default(r#"["7", [], []]"#).unwrap_err();
        assert!(err.reason.contains("not an object"));
    }

    #[test]
    fn test_json_payload_leaves_bare_json_untouched() {
        assert_eq!(json_payload("  {\"a\": \"```x\"}\n"), "{\"a\": \"```x\"}");
    }

    #[test]
    fn test_fenced_block_without_closing_fence_runs_to_end() {
        assert_eq!(fenced_block("```json\n{\"a\": 1"), Some("{\"a\": 1"));
    }

    #[test]
    fn test_custom_schema_keys() {
        let schema = ResponseSchema {
            score_key: "score",
            keywords_key: "gaps",
            suggestions_key: "tips",
        };
        let result = parse(r#"{"score":"9","gaps":["SQL"],"tips":[]}"#, &schema).unwrap();
        assert_eq!(result.relevance_score, "9");
        assert_eq!(result.missing_keywords, vec!["SQL"]);
    }
}
