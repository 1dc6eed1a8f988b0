//! Locating and parsing the model's JSON answer
//!
//! Models are told to answer with bare JSON but regularly wrap it in a
//! markdown code block, and occasionally add a sentence of prose around it.
//! Both are tolerated here.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{error::Category, Value};
use shared_types::AnalysisResult;
use tracing::debug;

use crate::error::GatewayError;

lazy_static! {
    /// Opening ```json fence (plus newline) or closing fence (plus preceding newline)
    static ref CODE_FENCE_PATTERN: Regex = Regex::new(r"```json\n?|\n?```").unwrap();
}

/// Locate, clean up and parse the analysis in a raw upstream response
pub fn extract_and_parse(raw: &Value) -> Result<AnalysisResult, GatewayError> {
    let text = locate_text(raw).ok_or_else(|| {
        GatewayError::MalformedUpstreamPayload(
            "upstream response contained no text content".to_string(),
        )
    })?;

    let cleaned = strip_code_fences(text);
    let json = json_object_slice(&cleaned);
    debug!(payload_chars = json.len(), "Parsing analysis payload");

    serde_json::from_str(json).map_err(|e| {
        let truncated = raw.get("stop_reason").and_then(Value::as_str) == Some("max_tokens");
        let msg = if truncated {
            format!("analysis JSON is incomplete (response hit max_tokens): {}", e)
        } else if e.classify() == Category::Data {
            format!("analysis JSON does not match the expected schema: {}", e)
        } else {
            format!("analysis is not valid JSON: {}", e)
        };
        GatewayError::MalformedUpstreamPayload(msg)
    })
}

/// Find the textual payload in either the Messages or the legacy Completions shape
pub fn locate_text(raw: &Value) -> Option<&str> {
    let from_content = raw
        .get("content")
        .and_then(Value::as_array)
        .and_then(|blocks| {
            blocks.iter().find_map(|block| {
                match block.get("type").and_then(Value::as_str) {
                    Some("text") => block.get("text").and_then(Value::as_str),
                    _ => None,
                }
            })
        });

    from_content.or_else(|| raw.get("completion").and_then(Value::as_str))
}

/// Remove markdown code fences and surrounding whitespace
pub fn strip_code_fences(text: &str) -> String {
    CODE_FENCE_PATTERN.replace_all(text, "").trim().to_string()
}

/// Narrow `text` to the outermost `{ ... }` when prose surrounds it
fn json_object_slice(text: &str) -> &str {
    if text.starts_with('{') {
        return text;
    }
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => &text[start..=end],
        _ => text,
    }
}
