//! Signed nanosecond durations: parsing, formatting, and rounding.
//!
//! The text form is a sequence of decimal numbers, each with an optional
//! fraction and a unit suffix, such as `300ms`, `-1.5h`, or `2h45m`. Valid
//! units are `ns`, `us` (or `µs`), `ms`, `s`, `m`, and `h`.

use quill_foundation::{Error, Result};

/// Nanoseconds in one microsecond.
pub const MICROSECOND: u64 = 1_000;
/// Nanoseconds in one millisecond.
pub const MILLISECOND: u64 = 1_000 * MICROSECOND;
/// Nanoseconds in one second.
pub const SECOND: u64 = 1_000 * MILLISECOND;
/// Nanoseconds in one minute.
pub const MINUTE: u64 = 60 * SECOND;
/// Nanoseconds in one hour.
pub const HOUR: u64 = 60 * MINUTE;
/// Nanoseconds in one day.
pub const DAY: u64 = 24 * HOUR;

const UNITS: [(&str, u64); 8] = [
    ("ns", 1),
    ("us", MICROSECOND),
    ("\u{b5}s", MICROSECOND),
    ("\u{3bc}s", MICROSECOND),
    ("ms", MILLISECOND),
    ("s", SECOND),
    ("m", MINUTE),
    ("h", HOUR),
];

// ============================================================================
// Parsing
// ============================================================================

fn invalid(text: &str) -> Error {
    Error::parse(format!("invalid duration {text:?}"))
}

/// Splits the leading ASCII digits off `s`.
fn leading_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

/// Parses a duration string into nanoseconds.
///
/// # Errors
///
/// Returns [`ErrorKind::ParseError`] for malformed text, unknown units, and
/// values outside the `i64` nanosecond range.
///
/// [`ErrorKind::ParseError`]: quill_foundation::ErrorKind::ParseError
pub fn parse(text: &str) -> Result<i64> {
    let (negative, mut rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    if rest == "0" {
        return Ok(0);
    }
    if rest.is_empty() {
        return Err(invalid(text));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (whole, after_whole) = leading_digits(rest);
        let (fraction, after_fraction) = match after_whole.strip_prefix('.') {
            Some(tail) => leading_digits(tail),
            None => ("", after_whole),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid(text));
        }

        let unit_len = after_fraction
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after_fraction.len());
        let (unit_name, tail) = after_fraction.split_at(unit_len);
        if unit_name.is_empty() {
            return Err(Error::parse(format!("missing unit in duration {text:?}")));
        }
        let Some(&(_, unit)) = UNITS.iter().find(|(name, _)| *name == unit_name) else {
            return Err(Error::parse(format!(
                "unknown unit {unit_name:?} in duration {text:?}"
            )));
        };

        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid(text))?
        };
        let mut value = whole.checked_mul(u128::from(unit)).ok_or_else(|| invalid(text))?;
        value += fractional_nanos(fraction, unit);
        total = total.checked_add(value).ok_or_else(|| invalid(text))?;
        if total > u128::from(i64::MAX.unsigned_abs()) + 1 {
            return Err(invalid(text));
        }
        rest = tail;
    }

    if negative {
        let magnitude = i128::try_from(total).map_err(|_| invalid(text))?;
        i64::try_from(-magnitude).map_err(|_| invalid(text))
    } else {
        i64::try_from(total).map_err(|_| invalid(text))
    }
}

/// Nanoseconds contributed by the digits after the decimal point.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn fractional_nanos(digits: &str, unit: u64) -> u128 {
    // Digits past 18 cannot change the result at nanosecond resolution.
    let digits = &digits[..digits.len().min(18)];
    if digits.is_empty() {
        return 0;
    }
    let numerator: u64 = digits.parse().unwrap_or(0);
    let scale = 10f64.powi(i32::try_from(digits.len()).unwrap_or(18));
    (numerator as f64 * (unit as f64 / scale)) as u128
}

// ============================================================================
// Formatting
// ============================================================================

/// Splits `value` into its integer part and a `.ddd` fraction at `precision`
/// decimal places, with trailing zeros removed.
fn split_fraction(value: u64, precision: u32) -> (u64, String) {
    let pow = 10u64.pow(precision);
    let fraction = value % pow;
    if fraction == 0 {
        return (value / pow, String::new());
    }
    let digits = format!("{fraction:0width$}", width = precision as usize);
    (value / pow, format!(".{}", digits.trim_end_matches('0')))
}

/// Formats nanoseconds as a duration string such as `1h2m3.5s` or `1.2ms`.
///
/// Zero is `0s`. Durations under a second use the largest of `ns`, `µs`,
/// and `ms` that fits.
#[must_use]
pub fn format(nanos: i64) -> String {
    let magnitude = nanos.unsigned_abs();
    let sign = if nanos < 0 { "-" } else { "" };

    if magnitude == 0 {
        return "0s".to_string();
    }
    if magnitude < SECOND {
        let (precision, unit) = if magnitude < MICROSECOND {
            (0, "ns")
        } else if magnitude < MILLISECOND {
            (3, "\u{b5}s")
        } else {
            (6, "ms")
        };
        let (whole, fraction) = split_fraction(magnitude, precision);
        return format!("{sign}{whole}{fraction}{unit}");
    }

    let (seconds, fraction) = split_fraction(magnitude, 9);
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let mut out = sign.to_string();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if minutes > 0 {
        out.push_str(&format!("{}m", minutes % 60));
    }
    out.push_str(&format!("{}{fraction}s", seconds % 60));
    out
}

// ============================================================================
// Rounding
// ============================================================================

/// Rounds nanoseconds to the nearest whole second, halves away from zero.
#[must_use]
pub fn round_to_seconds(nanos: i64) -> i64 {
    let second = i128::from(SECOND);
    let value = i128::from(nanos);
    let remainder = (value % second).abs();
    let truncated = value - value.signum() * remainder;
    let rounded = if remainder * 2 < second {
        truncated
    } else {
        truncated + value.signum() * second
    };
    i64::try_from(rounded).unwrap_or(if nanos < 0 { i64::MIN } else { i64::MAX })
}

/// Describes a duration by its largest whole unit, such as `2y` or `3mo`.
///
/// A year is 365 days and a month 30 days. The sign is ignored, and a value
/// must strictly exceed one of a unit to be counted in it.
#[must_use]
pub fn coarse(nanos: i64) -> String {
    let magnitude = nanos.unsigned_abs();
    let units = [
        (365 * DAY, "y"),
        (30 * DAY, "mo"),
        (DAY, "d"),
        (HOUR, "h"),
        (MINUTE, "m"),
        (SECOND, "s"),
    ];
    units
        .iter()
        .find(|(size, _)| magnitude > *size)
        .map_or_else(|| "0s".to_string(), |(size, suffix)| {
            format!("{}{suffix}", magnitude / size)
        })
}
