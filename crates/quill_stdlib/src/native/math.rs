//! Integer and float arithmetic, ranges, and sequences.
//!
//! Integer arithmetic coerces every operand with `to_int64` and wraps on
//! overflow. Range builders (`until`, `untilStep`, `seq`) check their
//! iteration count against the loop ceiling before producing anything.

use quill_foundation::coerce::{to_float64, to_int64};
use quill_foundation::{Error, ErrorKind, Result, Value};

use crate::args;
use crate::context::Context;

// ============================================================================
// Ranges
// ============================================================================

/// Integers from `start` toward `stop` (exclusive) in increments of `step`.
///
/// A zero step, or a step pointing away from `stop`, gives no values.
///
/// # Errors
///
/// Returns [`SemanticLimit::LoopIterations`] if the range would be longer
/// than the loop ceiling.
///
/// [`SemanticLimit::LoopIterations`]: quill_foundation::SemanticLimit::LoopIterations
pub fn until_step(ctx: &Context, start: i64, stop: i64, step: i64) -> Result<Vec<i64>> {
    if step == 0 {
        return Ok(Vec::new());
    }
    let span = (i128::from(stop) - i128::from(start)).unsigned_abs();
    let count = span.div_ceil(u128::from(step.unsigned_abs()));
    ctx.limits()
        .check_iterations(u64::try_from(count).unwrap_or(u64::MAX))?;

    let ascending = stop >= start;
    if (ascending && step < 0) || (!ascending && step > 0) {
        return Ok(Vec::new());
    }

    let mut out = Vec::new();
    let mut i = start;
    while (ascending && i < stop) || (!ascending && i > stop) {
        out.push(i);
        match i.checked_add(step) {
            Some(next) => i = next,
            None => break,
        }
    }
    Ok(out)
}

/// Numeric: untilStep
pub(crate) fn native_until_step(ctx: &Context, args: &[Value]) -> Result<Value> {
    let start = args::int(args, 0)?;
    let stop = args::int(args, 1)?;
    let step = args::int(args, 2)?;
    Ok(Value::list(until_step(ctx, start, stop, step)?))
}

/// Numeric: until - `0..n`, counting down when `n` is negative
pub(crate) fn native_until(ctx: &Context, args: &[Value]) -> Result<Value> {
    let count = args::int(args, 0)?;
    let step = if count < 0 { -1 } else { 1 };
    Ok(Value::list(until_step(ctx, 0, count, step)?))
}

/// Numeric: seq - space-separated inclusive integer sequence
///
/// - `seq end` counts from 1
/// - `seq start end` counts by one in either direction
/// - `seq start step end` counts by `step`; a positive step toward a
///   smaller end gives `""`
///
/// Any other argument count gives `""`.
pub(crate) fn native_seq(ctx: &Context, args: &[Value]) -> Result<Value> {
    let params = (0..args.len())
        .map(|i| args::int(args, i))
        .collect::<Result<Vec<i64>>>()?;

    let direction = |start: i64, end: i64| if end < start { -1 } else { 1 };
    let values = match params[..] {
        [end] => {
            let inc = direction(1, end);
            until_step(ctx, 1, end.wrapping_add(inc), inc)?
        }
        [start, end] => {
            let inc = direction(start, end);
            until_step(ctx, start, end.wrapping_add(inc), inc)?
        }
        [start, step, end] => {
            let inc = direction(start, end);
            if inc < 0 && step > 0 {
                return Ok(args::text(""));
            }
            until_step(ctx, start, end.wrapping_add(inc), step)?
        }
        _ => return Ok(args::text("")),
    };

    let joined: Vec<String> = values.iter().map(i64::to_string).collect();
    Ok(args::text(joined.join(" ")))
}

// ============================================================================
// Integer arithmetic
// ============================================================================

fn int_args(args: &[Value]) -> impl Iterator<Item = i64> + '_ {
    args.iter().map(to_int64)
}

/// Numeric: add1
pub(crate) fn native_add1(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(Value::Int(to_int64(args::nth(args, 0)?).wrapping_add(1)))
}

/// Numeric: add
pub(crate) fn native_add(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(Value::Int(int_args(args).fold(0, i64::wrapping_add)))
}

/// Numeric: sub
pub(crate) fn native_sub(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let a = to_int64(args::nth(args, 0)?);
    let b = to_int64(args::nth(args, 1)?);
    Ok(Value::Int(a.wrapping_sub(b)))
}

/// Numeric: mul
pub(crate) fn native_mul(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(Value::Int(int_args(args).fold(1, i64::wrapping_mul)))
}

fn divisor(args: &[Value]) -> Result<(i64, i64)> {
    let a = to_int64(args::nth(args, 0)?);
    let b = to_int64(args::nth(args, 1)?);
    if b == 0 {
        return Err(Error::new(ErrorKind::DivisionByZero));
    }
    Ok((a, b))
}

/// Numeric: div - truncating integer division
pub(crate) fn native_div(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let (a, b) = divisor(args)?;
    Ok(Value::Int(a.wrapping_div(b)))
}

/// Numeric: mod - remainder with the sign of the dividend
pub(crate) fn native_mod(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let (a, b) = divisor(args)?;
    Ok(Value::Int(a.wrapping_rem(b)))
}

/// Numeric: max
pub(crate) fn native_max(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let first = to_int64(args::nth(args, 0)?);
    Ok(Value::Int(int_args(&args[1..]).fold(first, i64::max)))
}

/// Numeric: min
pub(crate) fn native_min(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let first = to_int64(args::nth(args, 0)?);
    Ok(Value::Int(int_args(&args[1..]).fold(first, i64::min)))
}

/// Numeric: randInt - uniform in `[min, max)`
pub(crate) fn native_rand_int(ctx: &Context, args: &[Value]) -> Result<Value> {
    let min = to_int64(args::nth(args, 0)?);
    let max = to_int64(args::nth(args, 1)?);
    match max.checked_sub(min) {
        Some(width) if width > 0 => Ok(Value::Int(ctx.random_in(min, max))),
        _ => Err(Error::invalid_argument(format!(
            "randInt needs min < max, got {min} and {max}"
        ))),
    }
}

/// Numeric: atoi - base-10 parse, 0 on failure
pub(crate) fn native_atoi(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(Value::Int(args::string(args, 0)?.parse().unwrap_or(0)))
}

/// Numeric: int64 - total conversion, 0 when nothing sensible applies
pub(crate) fn native_int64(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(Value::Int(to_int64(args::nth(args, 0)?)))
}

/// Numeric: float64
pub(crate) fn native_float64(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(Value::Float(to_float64(args::nth(args, 0)?)))
}

/// Numeric: toDecimal - reads the value's text as an octal literal
pub(crate) fn native_to_decimal(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let text = args::nth(args, 0)?.to_string();
    Ok(Value::Int(i64::from_str_radix(&text, 8).unwrap_or(0)))
}

// ============================================================================
// Float arithmetic
// ============================================================================

/// Numeric: maxf
pub(crate) fn native_maxf(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let first = to_float64(args::nth(args, 0)?);
    Ok(Value::Float(args[1..].iter().map(to_float64).fold(first, f64::max)))
}

/// Numeric: minf
pub(crate) fn native_minf(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let first = to_float64(args::nth(args, 0)?);
    Ok(Value::Float(args[1..].iter().map(to_float64).fold(first, f64::min)))
}

/// Numeric: ceil
pub(crate) fn native_ceil(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(Value::Float(to_float64(args::nth(args, 0)?).ceil()))
}

/// Numeric: floor
pub(crate) fn native_floor(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(Value::Float(to_float64(args::nth(args, 0)?).floor()))
}

/// Rounds `x` to `places` decimal places.
///
/// The scaled value rounds up when its fractional part is at least
/// `threshold`. The fractional part keeps the sign of `x`, so negative
/// halves round toward negative infinity.
#[must_use]
pub fn round(x: f64, places: i32, threshold: f64) -> f64 {
    let pow = 10f64.powi(places);
    let scaled = x * pow;
    let rounded = if scaled.fract() >= threshold {
        scaled.ceil()
    } else {
        scaled.floor()
    };
    rounded / pow
}

/// Numeric: round - `round x places [threshold]`, threshold defaulting to 0.5
pub(crate) fn native_round(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let x = to_float64(args::nth(args, 0)?);
    let places = args::int(args, 1)?;
    let places = i32::try_from(places).unwrap_or(if places < 0 { i32::MIN } else { i32::MAX });
    let threshold = args::optional(args, 2).map_or(0.5, to_float64);
    Ok(Value::Float(round(x, places, threshold)))
}
