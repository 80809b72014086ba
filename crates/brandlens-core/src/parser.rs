//! Locates the JSON object inside a free-text model reply.
//!
//! Heuristics run in order and the first success wins:
//!
//! 1. the trimmed reply parsed as-is
//! 2. the reply with Markdown code fences removed
//! 3. the slice from the first `{` to the last `}`

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// Reply that contained no usable JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct ParseFailure {
    pub reason: String,
    pub raw: String,
}

/// Parse a model reply into a JSON object.
pub fn parse_analysis(text: &str) -> Result<Value, ParseFailure> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(failure("empty reply", text));
    }

    // A valid JSON value that is not an object is remembered so the error
    // can say so instead of "no JSON object found".
    let mut non_object = None;

    for (step, candidate) in candidates(trimmed).into_iter().enumerate() {
        let Some(candidate) = candidate else {
            continue;
        };
        match serde_json::from_str::<Value>(candidate) {
            Ok(value @ Value::Object(_)) => {
                if step > 0 {
                    warn!("Model reply was not bare JSON, recovered on heuristic {}", step + 1);
                }
                return Ok(value);
            }
            Ok(other) => {
                non_object.get_or_insert(json_kind(&other));
            }
            Err(_) => {}
        }
    }

    let reason = match non_object {
        Some(kind) => format!("expected a JSON object, got {}", kind),
        None => "no JSON object found in reply".to_string(),
    };
    Err(failure(reason, text))
}

fn candidates(trimmed: &str) -> [Option<&str>; 3] {
    let fenced = strip_code_fences(trimmed);
    [
        Some(trimmed),
        (fenced != trimmed).then_some(fenced),
        brace_slice(trimmed),
    ]
}

/// Remove a surrounding Markdown code fence (```` ```json ```` or bare
/// ```` ``` ````). Text before the opening fence is dropped too. Returns the
/// input unchanged when there is no fence.
pub fn strip_code_fences(text: &str) -> &str {
    let Some(open) = text.find("```") else {
        return text;
    };
    let after_ticks = &text[open + 3..];
    // The info string ("json", "JSON", ...) runs to the end of the line.
    let body = match after_ticks.find('\n') {
        Some(newline) => &after_ticks[newline + 1..],
        None => after_ticks,
    };
    let body = match body.rfind("```") {
        Some(close) => &body[..close],
        None => body,
    };
    body.trim()
}

fn brace_slice(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn failure(reason: impl Into<String>, raw: &str) -> ParseFailure {
    ParseFailure {
        reason: reason.into(),
        raw: raw.to_string(),
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
