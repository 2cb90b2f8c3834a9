//! Response parser. Turns untrusted LLM text into validated, week-ordered entries.
//!
//! Models wrap JSON in prose, markdown fences or trailing commentary, so the payload
//! is located by trying to decode a JSON value at every `[` / `{` in the text and
//! taking the first list of entry objects. Individual bad elements are
//! skipped with a reason; only a missing payload or an all-bad payload fails.

use crate::domain::{
    ParseError, ParsedResponse, RawModelResponse, ScheduleEntry, SkipReason, SkippedEntry,
};
use serde_json::{Map, Value};

/// Field names accepted for the week index, in priority order.
const WEEK_KEYS: &[&str] = &["week", "week_number", "week_index", "week_no"];

/// Field names accepted for the task description, in priority order.
const TASK_KEYS: &[&str] = &[
    "task",
    "tasks",
    "description",
    "activity",
    "activities",
    "title",
    "name",
];

/// Parse a raw model response against a schedule of `duration` weeks.
///
/// Pure and deterministic. Entries are stably sorted by week, so tasks sharing a
/// week keep the order the model gave them.
///
/// # Errors
/// * [`ParseError::Malformed`] when no JSON payload can be located.
/// * [`ParseError::NoValidEntries`] when a payload was found but every element was rejected.
pub fn parse(raw: &RawModelResponse, duration: u32) -> Result<ParsedResponse, ParseError> {
    let items = locate_payload(raw.as_str()).ok_or(ParseError::Malformed)?;

    let mut entries = Vec::with_capacity(items.len());
    let mut skipped = Vec::new();
    for (index, item) in items.iter().enumerate() {
        match entry_from_value(item, duration) {
            Ok(entry) => entries.push(entry),
            Err(reason) => skipped.push(SkippedEntry { index, reason }),
        }
    }

    if entries.is_empty() {
        return Err(ParseError::NoValidEntries {
            skipped: skipped.len(),
        });
    }

    entries.sort_by_key(|e| e.week);
    Ok(ParsedResponse { entries, skipped })
}

/// Find the element list inside free text.
///
/// The first array holding at least one object, or object wrapping such an array
/// (`{"schedule": [...]}`), wins. A bare entry object is only used when no list
/// follows it, since models often echo the format example before the real list.
/// A non-empty array of scalars comes last, so its elements get rejected
/// individually instead of reporting a missing payload.
fn locate_payload(text: &str) -> Option<Vec<Value>> {
    let mut fallbacks = Fallbacks::default();
    let mut pos = 0;

    while let Some(rel) = text[pos..].find(['[', '{']) {
        let start = pos + rel;
        match decode_at(&text[start..]) {
            Some((value, consumed)) => {
                if let Some(items) = entry_list(value, &mut fallbacks) {
                    return Some(items);
                }
                pos = start + consumed;
            }
            None => pos = start + 1,
        }
    }

    fallbacks.bare_entry.or(fallbacks.scalars)
}

/// Lower-priority candidates seen while scanning, first of each kind.
#[derive(Default)]
struct Fallbacks {
    bare_entry: Option<Vec<Value>>,
    scalars: Option<Vec<Value>>,
}

/// Decode one JSON value at the start of `s`, ignoring whatever follows it.
/// Returns the value and the number of bytes it spans.
fn decode_at(s: &str) -> Option<(Value, usize)> {
    let mut stream = serde_json::Deserializer::from_str(s).into_iter::<Value>();
    match stream.next() {
        Some(Ok(value)) => Some((value, stream.byte_offset())),
        _ => None,
    }
}

fn entry_list(value: Value, fallbacks: &mut Fallbacks) -> Option<Vec<Value>> {
    match value {
        Value::Array(mut items) => {
            if items.iter().any(Value::is_object) {
                return Some(items);
            }
            // `[[{...}, ...]]`: one level of extra nesting.
            let nested = items.len() == 1
                && items[0]
                    .as_array()
                    .is_some_and(|inner| inner.iter().any(Value::is_object));
            if nested {
                if let Some(Value::Array(inner)) = items.pop() {
                    return Some(inner);
                }
            }
            if fallbacks.scalars.is_none() && !items.is_empty() {
                fallbacks.scalars = Some(items);
            }
            None
        }
        Value::Object(mut map) => {
            let wrapped = map
                .iter()
                .find(|(_, v)| {
                    v.as_array()
                        .is_some_and(|items| items.iter().any(Value::is_object))
                })
                .map(|(k, _)| k.clone());
            if let Some(key) = wrapped {
                if let Some(Value::Array(items)) = map.remove(&key) {
                    return Some(items);
                }
            }
            if fallbacks.bare_entry.is_none() && find_field(&map, WEEK_KEYS).is_some() {
                fallbacks.bare_entry = Some(vec![Value::Object(map)]);
            }
            None
        }
        _ => None,
    }
}

fn entry_from_value(value: &Value, duration: u32) -> Result<ScheduleEntry, SkipReason> {
    let map = value.as_object().ok_or(SkipReason::NotAnObject)?;

    let week_value = find_field(map, WEEK_KEYS)
        .filter(|v| !v.is_null())
        .ok_or(SkipReason::MissingWeek)?;
    let week =
        coerce_week(week_value).ok_or_else(|| SkipReason::InvalidWeek(week_value.to_string()))?;
    if week < 1 || week > i64::from(duration) {
        return Err(SkipReason::WeekOutOfRange { week, duration });
    }

    let task_value = find_field(map, TASK_KEYS)
        .filter(|v| !v.is_null())
        .ok_or(SkipReason::MissingTask)?;
    let task = coerce_task(task_value)?;

    // Range was checked against a u32 above.
    Ok(ScheduleEntry::new(week as u32, task))
}

/// Look up the first of `keys` in `map` holding a non-blank value, falling back to the
/// first one present at all. Keys compare case-insensitively with spaces and dashes
/// treated as underscores ("Week Number" matches `week_number`).
fn find_field<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    let mut present = keys.iter().filter_map(|wanted| {
        map.iter()
            .find(|(k, _)| normalize_key(k) == *wanted)
            .map(|(_, v)| v)
    });
    let first = present.next()?;
    if !is_blank(first) {
        return Some(first);
    }
    Some(present.find(|v| !is_blank(v)).unwrap_or(first))
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => !items
            .iter()
            .filter_map(Value::as_str)
            .any(|s| !s.trim().is_empty()),
        _ => false,
    }
}

fn normalize_key(key: &str) -> String {
    key.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

fn coerce_week(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(integral_f64)),
        Value::String(s) => {
            let s = s.trim();
            let s = match s.get(..4) {
                Some(prefix) if prefix.eq_ignore_ascii_case("week") => s[4..].trim_start(),
                _ => s,
            };
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral_f64))
        }
        _ => None,
    }
}

fn integral_f64(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn coerce_task(value: &Value) -> Result<String, SkipReason> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Err(SkipReason::EmptyTask)
            } else {
                Ok(trimmed.to_string())
            }
        }
        Value::Array(items) => {
            let parts: Vec<&str> = items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            if parts.is_empty() {
                Err(SkipReason::EmptyTask)
            } else {
                Ok(parts.join(", "))
            }
        }
        _ => Err(SkipReason::MissingTask),
    }
}
