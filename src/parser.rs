//! Best-effort conversion of free-form model output into a [`ResultList`].
//!
//! Nothing here fails. Output that cannot be understood becomes an empty list,
//! and elements that cannot be understood become records with empty fields.
//!
//! ```text
//!     raw text
//!        |
//!        +--> parse_strict      whole text as JSON, must be an array
//!        |        | (no array)
//!        |        v
//!        +--> parse_embedded    greedy {..} / [..] span, must be an array
//!        |        | (no array)
//!        |        v
//!        |     []
//!        v
//!     normalize             first MAX_RESULTS candidates -> ResultRecord
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::data_models::{MAX_RESULTS, ResultList, ResultRecord};

/// Leftmost match wins. At a given position the object form is tried before the
/// array form, and both run greedily to the *last* closer in the text.
static EMBEDDED_JSON: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[\s\S]*\}|\[[\s\S]*\]").unwrap());

/// Parses `raw` and normalizes the outcome. Never fails.
pub fn parse_results(raw: &str) -> ResultList {
    normalize(parse_candidates(raw))
}

/// Runs both parse attempts and returns the candidate list, possibly empty.
pub fn parse_candidates(raw: &str) -> Vec<Value> {
    if let Some(candidates) = parse_strict(raw) {
        return candidates;
    }
    if let Some(candidates) = parse_embedded(raw) {
        log::debug!("recovered {} candidates from embedded json", candidates.len());
        return candidates;
    }
    Vec::new()
}

/// Attempt 1: the whole text is a JSON array.
pub fn parse_strict(raw: &str) -> Option<Vec<Value>> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => Some(items),
        _ => None,
    }
}

/// Attempt 2: the earliest brace/bracket-delimited span parses as a JSON array.
pub fn parse_embedded(raw: &str) -> Option<Vec<Value>> {
    let span = extract_embedded(raw)?;
    match serde_json::from_str::<Value>(span) {
        Ok(Value::Array(items)) => Some(items),
        _ => None,
    }
}

/// Returns the span the fallback would try to parse, if any.
pub fn extract_embedded(raw: &str) -> Option<&str> {
    EMBEDDED_JSON.find(raw).map(|m| m.as_str())
}

/// Truncates to `MAX_RESULTS` and maps each candidate to a record.
pub fn normalize(candidates: Vec<Value>) -> ResultList {
    ResultList::from_records(candidates.iter().take(MAX_RESULTS).map(normalize_record))
}

/// Maps one candidate element to a record. Non-objects yield an all-empty record.
pub fn normalize_record(candidate: &Value) -> ResultRecord {
    let Value::Object(fields) = candidate else {
        return ResultRecord::default();
    };

    let url = first_present(fields, &["url", "link"]).unwrap_or_default();
    let title = first_present(fields, &["title", "name"]).unwrap_or_else(|| url.clone());
    let description = first_present(fields, &["description", "snippet"]).unwrap_or_default();

    ResultRecord {
        url,
        title,
        description,
    }
}

fn first_present(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find_map(present_text)
}

/// Text of `value` if it counts as present, `None` for missing-like values.
pub fn present_text(value: &Value) -> Option<String> {
    is_present(value).then(|| render(value))
}

/// `null`, `false`, zero and the empty string count as missing.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
