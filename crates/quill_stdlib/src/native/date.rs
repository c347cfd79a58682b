//! Time formatting, parsing, and durations.
//!
//! Layouts follow the reference-time convention described in
//! [`layout`](super::layout); durations use the text form described in
//! [`duration`](super::duration). "Local" always means the context's zone.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use quill_foundation::{Error, Result, Value};

use super::duration;
use super::layout::{HTML_DATE, Layout};
use crate::args;
use crate::context::Context;

/// Seconds from the Unix epoch back to `0001-01-01T00:00:00Z`.
const ZERO_TIME_EPOCH: i64 = -62_135_596_800;

// ============================================================================
// Helpers
// ============================================================================

/// Resolves a zone name: `"Local"` is the context zone, and an empty or
/// unknown name is UTC.
fn zone_named(ctx: &Context, name: &str) -> Tz {
    match name {
        "Local" => ctx.zone(),
        "" => Tz::UTC,
        other => other.parse().unwrap_or(Tz::UTC),
    }
}

/// Reads a time argument: a time, epoch seconds, or anything else for now.
///
/// Epoch seconds outside the representable range clamp to its ends.
fn instant(ctx: &Context, value: &Value) -> DateTime<Tz> {
    let seconds = match value {
        Value::Time(t) => return *t,
        Value::Int(n) => *n,
        Value::Uint(n) => i64::try_from(*n).unwrap_or(i64::MAX),
        _ => return ctx.now(),
    };
    let seconds = seconds.clamp(
        DateTime::<Utc>::MIN_UTC.timestamp(),
        DateTime::<Utc>::MAX_UTC.timestamp(),
    );
    DateTime::from_timestamp(seconds, 0)
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
        .with_timezone(&ctx.zone())
}

fn format_in(ctx: &Context, layout: &str, t: &Value, zone: &str) -> Result<Value> {
    let t = instant(ctx, t).with_timezone(&zone_named(ctx, zone));
    Ok(args::text(Layout::new(layout).format(&t)?))
}

/// Nanoseconds elapsed from `t` to the context's now, saturating.
fn since(ctx: &Context, t: &DateTime<Tz>) -> i64 {
    let elapsed = ctx.now().signed_duration_since(*t);
    elapsed.num_nanoseconds().unwrap_or(if elapsed < TimeDelta::zero() {
        i64::MIN
    } else {
        i64::MAX
    })
}

fn zero_time() -> Value {
    Tz::UTC
        .timestamp_opt(ZERO_TIME_EPOCH, 0)
        .single()
        .map_or(Value::Nil, Value::Time)
}

// ============================================================================
// Formatting
// ============================================================================

/// Date: date - format in the local zone
pub(crate) fn native_date(ctx: &Context, args: &[Value]) -> Result<Value> {
    format_in(ctx, args::string(args, 0)?, args::nth(args, 1)?, "Local")
}

/// Date: dateInZone
pub(crate) fn native_date_in_zone(ctx: &Context, args: &[Value]) -> Result<Value> {
    let layout = args::string(args, 0)?;
    let t = args::nth(args, 1)?;
    format_in(ctx, layout, t, args::string(args, 2)?)
}

/// Date: htmlDate - `YYYY-MM-DD` in the local zone
pub(crate) fn native_html_date(ctx: &Context, args: &[Value]) -> Result<Value> {
    format_in(ctx, HTML_DATE, args::nth(args, 0)?, "Local")
}

/// Date: htmlDateInZone
pub(crate) fn native_html_date_in_zone(ctx: &Context, args: &[Value]) -> Result<Value> {
    let t = args::nth(args, 0)?;
    format_in(ctx, HTML_DATE, t, args::string(args, 1)?)
}

/// Date: now
pub(crate) fn native_now(ctx: &Context, _args: &[Value]) -> Result<Value> {
    Ok(Value::Time(ctx.now()))
}

/// Date: unixEpoch - epoch seconds as text
pub(crate) fn native_unix_epoch(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(args::text(args::time(args, 0)?.timestamp().to_string()))
}

// ============================================================================
// Parsing and arithmetic
// ============================================================================

/// Date: mustToDate - parse in the local zone
pub(crate) fn native_must_to_date(ctx: &Context, args: &[Value]) -> Result<Value> {
    let layout = Layout::new(args::string(args, 0)?);
    let text = args::string(args, 1)?;
    Ok(Value::Time(layout.parse(text, ctx.zone())?))
}

/// Date: toDate - the zero time when the text does not parse
pub(crate) fn native_to_date(ctx: &Context, args: &[Value]) -> Result<Value> {
    args::string(args, 0)?;
    args::string(args, 1)?;
    Ok(native_must_to_date(ctx, args).unwrap_or_else(|_| zero_time()))
}

/// Date: mustDateModify - shift a time by a duration string
pub(crate) fn native_must_date_modify(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let offset = duration::parse(args::string(args, 0)?)?;
    let t = args::time(args, 1)?;
    t.checked_add_signed(TimeDelta::nanoseconds(offset))
        .map(Value::Time)
        .ok_or_else(|| Error::invalid_argument("shifted time is out of range"))
}

/// Date: dateModify - the time unchanged when the duration does not parse
pub(crate) fn native_date_modify(ctx: &Context, args: &[Value]) -> Result<Value> {
    args::string(args, 0)?;
    let t = args::time(args, 1)?;
    Ok(native_must_date_modify(ctx, args).unwrap_or(Value::Time(t)))
}

// ============================================================================
// Durations
// ============================================================================

/// Date: ago - time since `t`, to the second
pub(crate) fn native_date_ago(ctx: &Context, args: &[Value]) -> Result<Value> {
    let t = instant(ctx, args::nth(args, 0)?);
    let elapsed = duration::round_to_seconds(since(ctx, &t));
    Ok(args::text(duration::format(elapsed)))
}

/// Date: duration - seconds as a duration string
pub(crate) fn native_duration(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let seconds = match args::nth(args, 0)? {
        Value::String(s) => s.parse().unwrap_or(0),
        Value::Int(n) => *n,
        _ => 0,
    };
    let nanos = seconds.wrapping_mul(i64::try_from(duration::SECOND).unwrap_or(i64::MAX));
    Ok(args::text(duration::format(nanos)))
}

/// Date: durationRound - the largest whole unit, such as `2h` or `3mo`
pub(crate) fn native_duration_round(ctx: &Context, args: &[Value]) -> Result<Value> {
    let nanos = match args::nth(args, 0)? {
        Value::String(s) => duration::parse(s).unwrap_or(0),
        Value::Int(n) => *n,
        Value::Time(t) => since(ctx, t),
        _ => 0,
    };
    Ok(args::text(duration::coarse(nanos)))
}
