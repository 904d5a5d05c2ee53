//! Lenient parsing of model replies into typed results
//!
//! Models wrap JSON in Markdown fences or surround it with prose. The
//! payload is dug out first; field-level gaps fall back to defaults.

use crate::assist::types::{BugPrediction, DifficultyLevel, ErrorExplanation, Lesson, Severity};
use crate::error::{PyGeniusError, PyGeniusResult};
use serde_json::{Map, Value};

const FALLBACK_EXPLANATION_CHARS: usize = 500;

/// Best-effort JSON object text inside a reply
pub fn extract_json_payload(reply: &str) -> &str {
    let mut text = reply.trim();

    if let Some(rest) = text.strip_prefix("```") {
        // Drop the info string (`json`, `JSON`, ...) on the opening line
        text = match rest.find('\n') {
            Some(newline) => &rest[newline + 1..],
            None => rest,
        };
        text = text.trim_end();
        text = text.strip_suffix("```").unwrap_or(text).trim();
    }

    if !text.starts_with('{') {
        if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
            if start < end {
                text = &text[start..=end];
            }
        }
    }

    text
}

fn parse_object(reply: &str) -> PyGeniusResult<Map<String, Value>> {
    let payload = extract_json_payload(reply);
    match serde_json::from_str::<Value>(payload) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(PyGeniusError::parse("Expected a JSON object")),
        Err(e) => Err(PyGeniusError::parse(format!("Reply is not JSON: {}", e))),
    }
}

/// String field with a default; non-string scalars are stringified
fn string_field(map: &Map<String, Value>, key: &str, default: &str) -> String {
    match map.get(key) {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Error explanation from a reply; never fails
pub fn parse_error_explanation(reply: &str) -> ErrorExplanation {
    match parse_object(reply) {
        Ok(map) => ErrorExplanation::new(
            string_field(&map, "errorType", "Unknown"),
            string_field(&map, "explanation", reply),
            string_field(&map, "suggestion", ""),
            string_field(&map, "example", ""),
        ),
        Err(e) => {
            tracing::debug!("Error explanation reply was not JSON ({}), using raw text", e);
            ErrorExplanation::new(
                "Analysis",
                reply.chars().take(FALLBACK_EXPLANATION_CHARS).collect::<String>(),
                "Review the analysis above.",
                "",
            )
        }
    }
}

/// Bug predictions from an `{"issues": [...]}` reply
pub fn parse_bug_predictions(reply: &str) -> PyGeniusResult<Vec<BugPrediction>> {
    let map = parse_object(reply)?;
    let issues = map
        .get("issues")
        .and_then(Value::as_array)
        .ok_or_else(|| PyGeniusError::missing_field("issues"))?;

    Ok(issues
        .iter()
        .filter_map(Value::as_object)
        .map(|issue| {
            BugPrediction::new(
                line_number(issue.get("line")),
                string_field(issue, "message", ""),
                Severity::parse_lenient(&string_field(issue, "severity", "LOW")),
                string_field(issue, "fix", ""),
            )
        })
        .collect())
}

fn line_number(value: Option<&Value>) -> u32 {
    let line = match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    line.and_then(|l| u32::try_from(l).ok()).unwrap_or(0)
}

/// Lesson from a reply; difficulty is always the requested level
pub fn parse_lesson(reply: &str, level: DifficultyLevel) -> PyGeniusResult<Lesson> {
    let map = parse_object(reply)?;

    let hints = map
        .get("hints")
        .and_then(Value::as_array)
        .map(|hints| {
            hints
                .iter()
                .map(|hint| match hint {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(Lesson {
        title: string_field(&map, "title", "Python Lesson"),
        description: string_field(&map, "description", ""),
        code: string_field(&map, "code", ""),
        challenge: string_field(&map, "challenge", ""),
        hints,
        solution: string_field(&map, "solution", ""),
        difficulty: level,
    })
}
