//! Structured strategies: the whole input, or the first fenced code block,
//! decoded as a JSON array of records.
//!
//! Validation is all-or-nothing. One element with a missing key fails the
//! whole array; nothing is dropped or padded.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::types::{FailureReason, Record, Sequence};

/// One accepted `[time, event, note]` key triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyScheme {
    pub time: String,
    pub event: String,
    pub note: String,
}

impl KeyScheme {
    /// Build a scheme from exactly three distinct, non-empty keys.
    pub fn from_keys(keys: &[String]) -> Option<Self> {
        let [time, event, note] = keys else {
            return None;
        };
        let distinct = time != event && time != note && event != note;
        let filled = !time.is_empty() && !event.is_empty() && !note.is_empty();
        (distinct && filled).then(|| Self {
            time: time.clone(),
            event: event.clone(),
            note: note.clone(),
        })
    }

    fn matches(&self, object: &Map<String, Value>) -> bool {
        object.contains_key(&self.time)
            && object.contains_key(&self.event)
            && object.contains_key(&self.note)
    }
}

/// Opening fence, everything up to the next fence, closing fence.
fn fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```(.*?)```").expect("fence regex must compile"))
}

/// Drop the language tag from a block. The tag ends at a newline, or at
/// the opening bracket of JSON on the same line (```` ```json [...]``` ````).
/// Anything else is content: ```` ```BODY``` ```` keeps `BODY`.
fn strip_language_tag(block: &str) -> &str {
    let tag_len = block
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '.' | '-')))
        .unwrap_or(block.len());
    let rest = block[tag_len..].trim_start_matches([' ', '\t']);
    if let Some(body) = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')) {
        return body;
    }
    if tag_len > 0 && rest.starts_with(['[', '{']) {
        return rest;
    }
    block
}

/// Strategy 1: the whole (trimmed) text is the array.
pub(crate) fn decode_direct(text: &str, schemes: &[KeyScheme]) -> Result<Sequence, FailureReason> {
    decode_array(text, schemes).map_err(|err| match err {
        DecodeError::NotJson => FailureReason::NotStructured,
        DecodeError::Invalid(detail) => FailureReason::MalformedStructured { detail },
    })
}

/// Strategy 2: the interior of the first fenced block is the array.
pub(crate) fn decode_fenced(text: &str, schemes: &[KeyScheme]) -> Result<Sequence, FailureReason> {
    let interior = extract_fence(text).ok_or(FailureReason::NoFencedBlock)?;
    decode_array(interior.trim(), schemes).map_err(|err| {
        let detail = match err {
            DecodeError::NotJson => "block does not contain JSON".to_string(),
            DecodeError::Invalid(detail) => detail,
        };
        FailureReason::MalformedFencedContent { detail }
    })
}

/// Interior text of the first complete fenced block, if any.
pub(crate) fn extract_fence(text: &str) -> Option<&str> {
    fence_re()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| strip_language_tag(m.as_str()))
}

enum DecodeError {
    /// The text does not look like JSON at all.
    NotJson,
    /// The text looked like JSON but failed decoding or validation.
    Invalid(String),
}

fn decode_array(text: &str, schemes: &[KeyScheme]) -> Result<Sequence, DecodeError> {
    // Only text opening like an array or object counts as an attempt at
    // structured output; a bare number or string is prose to us.
    if !text.starts_with(['[', '{']) {
        return Err(DecodeError::NotJson);
    }
    let value: Value =
        serde_json::from_str(text).map_err(|err| DecodeError::Invalid(err.to_string()))?;

    let Value::Array(items) = value else {
        return Err(DecodeError::Invalid(format!(
            "expected an array, found {}",
            kind(&value)
        )));
    };
    if items.is_empty() {
        return Err(DecodeError::Invalid("array is empty".to_string()));
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| to_record(index, item, schemes))
        .collect::<Result<Sequence, _>>()
        .map_err(DecodeError::Invalid)
}

fn to_record(index: usize, item: &Value, schemes: &[KeyScheme]) -> Result<Record, String> {
    let Value::Object(object) = item else {
        return Err(format!("element {index} is {}, not an object", kind(item)));
    };
    let scheme = schemes
        .iter()
        .find(|scheme| scheme.matches(object))
        .ok_or_else(|| format!("element {index} is missing a time, event or note key"))?;

    let field = |key: &str| {
        text_value(&object[key]).ok_or_else(|| format!("element {index} field {key:?} is not text"))
    };
    Ok(Record {
        time: field(&scheme.time)?,
        event: field(&scheme.event)?,
        note: field(&scheme.note)?,
    })
}

/// Scalar JSON values become text; containers are rejected.
fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
