//! Total conversions from untyped values to numbers, text, and truthiness.
//!
//! Every function here is infallible: inputs that cannot be converted fall
//! back to a zero value instead of producing an error.

use crate::collections::LtVec;
use crate::value::Value;

/// Converts a value to a signed 64-bit integer.
///
/// - Strings are parsed in base 10; a failed parse gives 0
/// - A `Uint` above `i64::MAX` clamps to `i64::MAX`
/// - Floats truncate toward zero (NaN gives 0, infinities saturate)
/// - `true` is 1, `false` is 0
/// - Anything else is 0
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn to_int64(value: &Value) -> i64 {
    match value {
        Value::String(s) => s.parse().unwrap_or(0),
        Value::Int(n) => *n,
        Value::Uint(n) => i64::try_from(*n).unwrap_or(i64::MAX),
        Value::Float(f) => *f as i64,
        Value::Bool(b) => i64::from(*b),
        _ => 0,
    }
}

/// Converts a value to a 64-bit float.
///
/// Strings are parsed with float syntax; a failed parse gives 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn to_float64(value: &Value) -> f64 {
    match value {
        Value::String(s) => s.parse().unwrap_or(0.0),
        Value::Int(n) => *n as f64,
        Value::Uint(n) => *n as f64,
        Value::Float(f) => *f,
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => 0.0,
    }
}

/// Converts a value to text.
///
/// Strings pass through, bytes decode as (lossy) UTF-8, host objects render
/// their error message or custom text, and everything else uses the
/// template rendering of [`Value`]'s `Display`.
#[must_use]
pub fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.to_string(),
        Value::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
        Value::Opaque(o) => o.render(),
        other => other.to_string(),
    }
}

/// Converts a value to a list of strings.
///
/// Sequence elements are converted with [`to_text`], skipping nil. Nil
/// becomes an empty list and any other value a one-element list.
#[must_use]
pub fn to_strings(value: &Value) -> Vec<String> {
    match value {
        Value::Nil => Vec::new(),
        Value::Vec(items) => items
            .iter()
            .filter(|v| !v.is_nil())
            .map(to_text)
            .collect(),
        Value::Bytes(bytes) => bytes.iter().map(u8::to_string).collect(),
        other => vec![to_text(other)],
    }
}

/// Returns the elements of a sequence-like value.
///
/// Bytes count as a sequence of byte integers. Returns `None` for anything
/// that is not a sequence.
#[must_use]
pub fn as_sequence(value: &Value) -> Option<LtVec<Value>> {
    match value {
        Value::Vec(items) => Some(items.clone()),
        Value::Bytes(bytes) => Some(bytes.iter().map(|b| Value::Int(i64::from(*b))).collect()),
        _ => None,
    }
}

/// Returns true if the value is empty.
///
/// - Nil is empty
/// - Strings, bytes, sequences, and mappings are empty at length 0
/// - `false` and numeric zero are empty
/// - Times and host objects are never empty
#[must_use]
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Nil => true,
        Value::Bool(b) => !b,
        Value::Int(n) => *n == 0,
        Value::Uint(n) => *n == 0,
        Value::Float(f) => *f == 0.0,
        Value::String(s) => s.is_empty(),
        Value::Bytes(b) => b.is_empty(),
        Value::Vec(v) => v.is_empty(),
        Value::Map(m) => m.is_empty(),
        Value::Time(_) | Value::Opaque(_) => false,
    }
}

/// Formats a float with the shortest digits that round-trip.
///
/// Exponent notation is used when the decimal exponent is below -4 or at
/// least 6, written with a sign and two or more digits (`1e+06`, `2.5e-07`).
#[must_use]
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    if f == 0.0 {
        return if f.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let sci = format!("{f:e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return format!("{f}");
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    if (-4..6).contains(&exp) {
        return format!("{f}");
    }
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
}
