//! Sequence construction and manipulation.
//!
//! Inputs are never mutated; every operation that changes a sequence returns
//! a new one sharing structure with the original.

use quill_foundation::coerce::{as_sequence, is_empty, to_int64, to_strings, to_text};
use quill_foundation::{Error, LtVec, Result, Value};

use crate::args;
use crate::context::Context;

/// Converts a length to an `i64` bound, saturating.
fn len_i64(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

/// Converts a clamped, non-negative bound back to an index.
fn index(bound: i64) -> usize {
    usize::try_from(bound).unwrap_or(0)
}

/// List: list / tuple
pub(crate) fn native_list(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(Value::Vec(args.iter().cloned().collect()))
}

/// List: push / append
pub(crate) fn native_push(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let seq = args::sequence(args, 0)?;
    let item = args::nth(args, 1)?;
    Ok(Value::Vec(seq.push_back(item.clone())))
}

/// List: prepend
pub(crate) fn native_prepend(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let seq = args::sequence(args, 0)?;
    let item = args::nth(args, 1)?;
    Ok(Value::Vec(seq.push_front(item.clone())))
}

/// List: chunk - split into sub-sequences of `size` elements
///
/// The chunk count is checked against the context ceiling before any chunk
/// is built.
pub(crate) fn native_chunk(ctx: &Context, args: &[Value]) -> Result<Value> {
    let seq = args::sequence(args, 1)?;
    let size = args::int(args, 0)?;
    if size < 1 {
        return Err(Error::invalid_argument(format!(
            "chunk size must be at least 1, got {size}"
        )));
    }
    let size = usize::try_from(size).unwrap_or(usize::MAX);
    let count = seq.len().div_ceil(size);
    ctx.limits().check_chunks(count as u64)?;

    let chunks: LtVec<Value> = (0..count)
        .map(|i| Value::Vec(seq.slice(i * size, (i * size).saturating_add(size))))
        .collect();
    Ok(Value::Vec(chunks))
}

/// List: first
pub(crate) fn native_first(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let seq = args::sequence(args, 0)?;
    Ok(seq.first().cloned().unwrap_or(Value::Nil))
}

/// List: last
pub(crate) fn native_last(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let seq = args::sequence(args, 0)?;
    Ok(seq.last().cloned().unwrap_or(Value::Nil))
}

/// List: rest - everything but the first element
pub(crate) fn native_rest(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let seq = args::sequence(args, 0)?;
    if seq.is_empty() {
        return Ok(Value::Nil);
    }
    Ok(Value::Vec(seq.slice(1, seq.len())))
}

/// List: initial - everything but the last element
pub(crate) fn native_initial(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let seq = args::sequence(args, 0)?;
    if seq.is_empty() {
        return Ok(Value::Nil);
    }
    Ok(Value::Vec(seq.slice(0, seq.len() - 1)))
}

/// List: reverse
pub(crate) fn native_reverse(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let seq = args::sequence(args, 0)?;
    Ok(Value::Vec(seq.reversed()))
}

/// List: compact - drop empty elements
pub(crate) fn native_compact(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let seq = args::sequence(args, 0)?;
    Ok(Value::Vec(seq.into_iter().filter(|v| !is_empty(v)).collect()))
}

/// List: uniq - keep the first occurrence of each element
pub(crate) fn native_uniq(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let seq = args::sequence(args, 0)?;
    let mut seen: Vec<Value> = Vec::with_capacity(seq.len());
    for item in seq {
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    Ok(Value::Vec(seen.into_iter().collect()))
}

/// List: without - drop elements equal to any of the omitted values
pub(crate) fn native_without(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let seq = args::sequence(args, 0)?;
    let omit = args.get(1..).unwrap_or_default();
    Ok(Value::Vec(
        seq.into_iter().filter(|v| !omit.contains(v)).collect(),
    ))
}

/// List: has - membership under structural equality
pub(crate) fn native_has(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let needle = args::nth(args, 0)?;
    let haystack = args::nth(args, 1)?;
    if haystack.is_nil() {
        return Ok(Value::Bool(false));
    }
    let seq = args::sequence_of(haystack)?;
    Ok(Value::Bool(seq.iter().any(|v| v == needle)))
}

/// List: slice - `seq[start..end]` with clamped bounds
pub(crate) fn native_slice(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let seq = args::sequence(args, 0)?;
    if seq.is_empty() {
        return Ok(Value::Nil);
    }
    let len = len_i64(seq.len());
    let start = args::optional(args, 1).map_or(0, to_int64).clamp(0, len);
    let end = args::optional(args, 2).map_or(len, to_int64).clamp(0, len);
    Ok(Value::Vec(seq.slice(index(start), index(end))))
}

/// List: concat - flatten sequences into one
pub(crate) fn native_concat(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let mut out = LtVec::new();
    for arg in args {
        out = out.concat(&args::sequence_of(arg)?);
    }
    Ok(Value::Vec(out))
}

/// List: sortAlpha - sort the text of each element
pub(crate) fn native_sort_alpha(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let value = args::nth(args, 0)?;
    let mut texts = if as_sequence(value).is_some() {
        to_strings(value)
    } else {
        vec![to_text(value)]
    };
    texts.sort();
    Ok(Value::list(texts))
}
