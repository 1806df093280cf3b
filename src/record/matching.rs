//! Identifier comparison for JSON records.

use serde_json::Value;

use crate::config::IdMatch;

/// The comparison function for a match mode.
pub fn matcher(mode: IdMatch) -> fn(&Value, &Value) -> bool {
    match mode {
        IdMatch::Strict => strict_eq,
        IdMatch::Loose => loose_eq,
    }
}

/// Same JSON type and same value.
pub fn strict_eq(a: &Value, b: &Value) -> bool {
    a == b
}

/// Coercive scalar equality.
///
/// Strings compare as strings. Any other pairing of numbers, booleans and
/// strings compares numerically: `true` is 1, `false` is 0, a blank string
/// is 0 and any other string must parse as a finite number. Arrays, objects
/// and `null` only equal themselves.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Null | Value::Array(_) | Value::Object(_), _)
        | (_, Value::Null | Value::Array(_) | Value::Object(_)) => a == b,
        _ => match (as_number(a), as_number(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
            }
        }
        _ => None,
    }
}

/// Whether identifier `id` is spelled `label` on a command line: a string
/// id equal to `label`, or a non-string id whose JSON text is `label`.
pub fn matches_label(id: &Value, label: &str) -> bool {
    match id {
        Value::String(s) => s == label,
        Value::Null => false,
        other => other.to_string() == label,
    }
}
