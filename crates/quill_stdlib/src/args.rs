//! Argument extraction helpers for native functions.
//!
//! The registry validates arity before dispatch, so a missing argument here is
//! reported as an arity error rather than a panic.

use chrono::DateTime;
use chrono_tz::Tz;
use quill_foundation::coerce::as_sequence;
use quill_foundation::{Arity, Error, LtVec, Mapping, Result, Type, Value};

/// Returns the argument at `index`.
pub(crate) fn nth(args: &[Value], index: usize) -> Result<&Value> {
    args.get(index)
        .ok_or_else(|| Error::arity_mismatch(Arity::Variadic(index + 1), args.len()))
}

/// Returns the argument at `index`, which must be a string.
pub(crate) fn string(args: &[Value], index: usize) -> Result<&str> {
    match nth(args, index)? {
        Value::String(s) => Ok(s),
        other => Err(Error::type_mismatch(Type::String, other.value_type())),
    }
}

/// Returns the argument at `index`, which must be an integer in `i64` range.
pub(crate) fn int(args: &[Value], index: usize) -> Result<i64> {
    let value = nth(args, index)?;
    value
        .as_int()
        .ok_or_else(|| Error::type_mismatch(Type::Integer, value.value_type()))
}

/// Returns the argument at `index`, which must be a boolean.
pub(crate) fn boolean(args: &[Value], index: usize) -> Result<bool> {
    let value = nth(args, index)?;
    value
        .as_bool()
        .ok_or_else(|| Error::type_mismatch(Type::Bool, value.value_type()))
}

/// Returns the argument at `index`, which must be a mapping.
pub(crate) fn mapping(args: &[Value], index: usize) -> Result<&Mapping> {
    let value = nth(args, index)?;
    value
        .as_map()
        .ok_or_else(|| Error::type_mismatch(Type::Map, value.value_type()))
}

/// Returns the argument at `index`, which must be a time.
pub(crate) fn time(args: &[Value], index: usize) -> Result<DateTime<Tz>> {
    let value = nth(args, index)?;
    value
        .as_time()
        .copied()
        .ok_or_else(|| Error::type_mismatch(Type::Time, value.value_type()))
}

/// Returns the argument at `index`, which must be a sequence or bytes.
pub(crate) fn sequence(args: &[Value], index: usize) -> Result<LtVec<Value>> {
    sequence_of(nth(args, index)?)
}

/// Returns the elements of `value`, which must be a sequence or bytes.
pub(crate) fn sequence_of(value: &Value) -> Result<LtVec<Value>> {
    as_sequence(value).ok_or_else(|| Error::type_mismatch(Type::Vec, value.value_type()))
}

/// Returns the argument at `index` if it was supplied.
pub(crate) fn optional(args: &[Value], index: usize) -> Option<&Value> {
    args.get(index)
}

/// Wraps text as a string value.
pub(crate) fn text(s: impl Into<std::sync::Arc<str>>) -> Value {
    Value::String(s.into())
}
