//! Reference-time layouts.
//!
//! A layout is an example rendering of the reference instant
//! `Mon Jan 2 15:04:05 MST 2006` (`01/02 03:04:05PM '06 -0700`). Each
//! recognized piece of that instant stands for the matching field, and
//! everything else is literal text:
//!
//! | token | field |
//! |---|---|
//! | `2006`, `06` | year |
//! | `January`, `Jan`, `01`, `1` | month |
//! | `02`, `2`, `_2` | day of month |
//! | `002`, `__2` | day of year |
//! | `Monday`, `Mon` | weekday |
//! | `15`, `03`, `3`, `PM`, `pm` | hour |
//! | `04`, `4` | minute |
//! | `05`, `5` | second |
//! | `.000`, `.999`, `,000` | fractional second |
//! | `MST` | zone abbreviation |
//! | `-0700`, `-07:00`, `-07`, `Z0700`, `Z07:00` | UTC offset |
//!
//! A [`Layout`] translates the tokens into `chrono` format items once and
//! uses them for both formatting and parsing.

use std::fmt::Write as _;

use chrono::format::{Fixed, Item, Numeric, Pad, Parsed, StrftimeItems};
use chrono::{DateTime, TimeZone, Timelike};
use chrono_tz::Tz;
use quill_foundation::{Error, Result};

/// Layout used by `htmlDate`.
pub const HTML_DATE: &str = "2006-01-02";

/// Which fields a layout mentions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Fields {
    year: bool,
    month: bool,
    day: bool,
    ordinal: bool,
    hour: bool,
    hour12: bool,
    meridiem: bool,
    minute: bool,
    second: bool,
    offset: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Year,
    Month,
    Day,
    Ordinal,
    Weekday,
    Hour,
    Hour12,
    Meridiem,
    Minute,
    Second,
    Fraction,
    Zone,
    Offset,
}

impl Fields {
    fn mark(&mut self, field: Field) {
        match field {
            Field::Year => self.year = true,
            Field::Month => self.month = true,
            Field::Day => self.day = true,
            Field::Ordinal => self.ordinal = true,
            Field::Hour => self.hour = true,
            Field::Hour12 => self.hour12 = true,
            Field::Meridiem => self.meridiem = true,
            Field::Minute => self.minute = true,
            Field::Second => self.second = true,
            Field::Offset => self.offset = true,
            Field::Weekday | Field::Fraction | Field::Zone => {}
        }
    }
}

/// One formatting step of a layout.
#[derive(Clone, Debug, PartialEq)]
enum Piece<'a> {
    Item(Item<'a>),
    /// Fractional second after `sep`: exactly `digits` digits, or at most
    /// `digits` with trailing zeros dropped when `trim` is set.
    Fraction { sep: char, digits: usize, trim: bool },
}

/// A compiled reference-time layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout<'a> {
    source: &'a str,
    pieces: Vec<Piece<'a>>,
    items: Vec<Item<'a>>,
    fields: Fields,
}

// ============================================================================
// Translation
// ============================================================================

fn numeric(n: Numeric, pad: Pad) -> Piece<'static> {
    Piece::Item(Item::Numeric(n, pad))
}

fn fixed(f: Fixed) -> Piece<'static> {
    Piece::Item(Item::Fixed(f))
}

/// Matches a fractional-second token: a `.` or `,` followed by a run of
/// `0`s or `9`s that is not followed by another digit.
fn fraction(rest: &str) -> Option<(usize, Piece<'static>)> {
    let bytes = rest.as_bytes();
    let digit = *bytes.get(1)?;
    if digit != b'0' && digit != b'9' {
        return None;
    }
    let run = bytes[1..].iter().take_while(|&&b| b == digit).count();
    if bytes.get(1 + run).is_some_and(u8::is_ascii_digit) {
        return None;
    }

    let piece = Piece::Fraction {
        sep: char::from(bytes[0]),
        digits: run.min(9),
        trim: digit == b'9',
    };
    Some((1 + run, piece))
}

/// Appends the fractional part of `nanos`, truncated to `digits` digits.
fn push_fraction(out: &mut String, nanos: u32, sep: char, digits: usize, trim: bool) {
    let all = format!("{:09}", nanos % 1_000_000_000);
    let mut shown = &all[..digits];
    if trim {
        shown = shown.trim_end_matches('0');
        if shown.is_empty() {
            return;
        }
    }
    out.push(sep);
    out.push_str(shown);
}

/// Builds the items used for parsing.
///
/// A `.` fraction of any width reads any number of digits. A `,` fraction
/// reads exactly 3, 6, or 9 digits.
fn parse_items<'a>(pieces: &[Piece<'a>]) -> Vec<Item<'a>> {
    let mut items = Vec::with_capacity(pieces.len());
    for piece in pieces {
        match piece {
            Piece::Item(item) => items.push(item.clone()),
            Piece::Fraction { sep: '.', .. } => items.push(Item::Fixed(Fixed::Nanosecond)),
            Piece::Fraction { digits, .. } => {
                let pattern = match digits {
                    0..=3 => "%3f",
                    4..=6 => "%6f",
                    _ => "%9f",
                };
                items.push(Item::Literal(","));
                items.extend(StrftimeItems::new(pattern));
            }
        }
    }
    items
}

/// Matches the token at the start of `rest`, longest first.
fn next_token(rest: &str) -> Option<(usize, Piece<'static>, Field)> {
    let starts = |prefix: &str| rest.starts_with(prefix);
    let bytes = rest.as_bytes();

    let token = match bytes.first()? {
        b'J' if starts("January") => (7, fixed(Fixed::LongMonthName), Field::Month),
        b'J' if starts("Jan") => (3, fixed(Fixed::ShortMonthName), Field::Month),
        b'M' if starts("Monday") => (6, fixed(Fixed::LongWeekdayName), Field::Weekday),
        b'M' if starts("Mon") => (3, fixed(Fixed::ShortWeekdayName), Field::Weekday),
        b'M' if starts("MST") => (3, fixed(Fixed::TimezoneName), Field::Zone),
        b'0' => match bytes.get(1) {
            Some(b'1') => (2, numeric(Numeric::Month, Pad::Zero), Field::Month),
            Some(b'2') => (2, numeric(Numeric::Day, Pad::Zero), Field::Day),
            Some(b'3') => (2, numeric(Numeric::Hour12, Pad::Zero), Field::Hour12),
            Some(b'4') => (2, numeric(Numeric::Minute, Pad::Zero), Field::Minute),
            Some(b'5') => (2, numeric(Numeric::Second, Pad::Zero), Field::Second),
            Some(b'6') => (2, numeric(Numeric::YearMod100, Pad::Zero), Field::Year),
            _ if starts("002") => (3, numeric(Numeric::Ordinal, Pad::Zero), Field::Ordinal),
            _ => return None,
        },
        b'1' if starts("15") => (2, numeric(Numeric::Hour, Pad::Zero), Field::Hour),
        b'1' => (1, numeric(Numeric::Month, Pad::None), Field::Month),
        b'2' if starts("2006") => (4, numeric(Numeric::Year, Pad::Zero), Field::Year),
        b'2' => (1, numeric(Numeric::Day, Pad::None), Field::Day),
        b'_' if starts("_2") && !starts("_2006") => {
            (2, numeric(Numeric::Day, Pad::Space), Field::Day)
        }
        b'_' if starts("__2") => (3, numeric(Numeric::Ordinal, Pad::Space), Field::Ordinal),
        b'3' => (1, numeric(Numeric::Hour12, Pad::None), Field::Hour12),
        b'4' => (1, numeric(Numeric::Minute, Pad::None), Field::Minute),
        b'5' => (1, numeric(Numeric::Second, Pad::None), Field::Second),
        b'P' if starts("PM") => (2, fixed(Fixed::UpperAmPm), Field::Meridiem),
        b'p' if starts("pm") => (2, fixed(Fixed::LowerAmPm), Field::Meridiem),
        b'-' if starts("-070000") => (7, fixed(Fixed::TimezoneOffset), Field::Offset),
        b'-' if starts("-07:00:00") => {
            (9, fixed(Fixed::TimezoneOffsetDoubleColon), Field::Offset)
        }
        b'-' if starts("-0700") => (5, fixed(Fixed::TimezoneOffset), Field::Offset),
        b'-' if starts("-07:00") => (6, fixed(Fixed::TimezoneOffsetColon), Field::Offset),
        b'-' if starts("-07") => (3, fixed(Fixed::TimezoneOffsetTripleColon), Field::Offset),
        b'Z' if starts("Z070000") => (7, fixed(Fixed::TimezoneOffsetZ), Field::Offset),
        b'Z' if starts("Z07:00:00") => (9, fixed(Fixed::TimezoneOffsetColonZ), Field::Offset),
        b'Z' if starts("Z0700") => (5, fixed(Fixed::TimezoneOffsetZ), Field::Offset),
        b'Z' if starts("Z07:00") => (6, fixed(Fixed::TimezoneOffsetColonZ), Field::Offset),
        b'Z' if starts("Z07") => (3, fixed(Fixed::TimezoneOffsetZ), Field::Offset),
        b'.' | b',' => {
            let (len, piece) = fraction(rest)?;
            (len, piece, Field::Fraction)
        }
        _ => return None,
    };
    Some(token)
}

impl<'a> Layout<'a> {
    /// Translates a reference-time layout.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        let mut pieces = Vec::new();
        let mut fields = Fields::default();
        let mut literal_start = 0;
        let mut i = 0;

        while i < source.len() {
            if let Some((len, piece, field)) = next_token(&source[i..]) {
                if literal_start < i {
                    pieces.push(Piece::Item(Item::Literal(&source[literal_start..i])));
                }
                pieces.push(piece);
                fields.mark(field);
                i += len;
                literal_start = i;
            } else {
                i += source[i..].chars().next().map_or(1, char::len_utf8);
            }
        }
        if literal_start < source.len() {
            pieces.push(Piece::Item(Item::Literal(&source[literal_start..])));
        }

        let items = parse_items(&pieces);
        Self { source, pieces, items, fields }
    }

    /// Returns the layout text this was built from.
    #[must_use]
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Renders `t` in its own zone.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`] if a field cannot be rendered.
    ///
    /// [`ErrorKind::InvalidArgument`]: quill_foundation::ErrorKind::InvalidArgument
    pub fn format(&self, t: &DateTime<Tz>) -> Result<String> {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Item(item) => {
                    write!(out, "{}", t.format_with_items(std::iter::once(item))).map_err(|_| {
                        Error::invalid_argument(format!(
                            "cannot format time with layout {:?}",
                            self.source
                        ))
                    })?;
                }
                Piece::Fraction { sep, digits, trim } => {
                    push_fraction(&mut out, t.nanosecond(), *sep, *digits, *trim);
                }
            }
        }
        Ok(out)
    }

    /// Parses `text` against this layout.
    ///
    /// Missing fields default to year 0, January, the 1st, and midnight. A
    /// parsed UTC offset fixes the instant, which is then shown in `zone`;
    /// without one the wall-clock time is read as local to `zone`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ParseError`] if the text does not match the
    /// layout or names a time that does not exist.
    ///
    /// [`ErrorKind::ParseError`]: quill_foundation::ErrorKind::ParseError
    pub fn parse(&self, text: &str, zone: Tz) -> Result<DateTime<Tz>> {
        let fail = |reason: &dyn std::fmt::Display| {
            Error::parse(format!(
                "cannot parse {text:?} as {:?}: {reason}",
                self.source
            ))
        };

        let mut parsed = Parsed::new();
        chrono::format::parse(&mut parsed, text, self.items.iter()).map_err(|e| fail(&e))?;
        self.fill_defaults(&mut parsed).map_err(|e| fail(&e))?;

        if self.fields.offset {
            let fixed = parsed.to_datetime().map_err(|e| fail(&e))?;
            return Ok(fixed.with_timezone(&zone));
        }
        let naive = parsed
            .to_naive_datetime_with_offset(0)
            .map_err(|e| fail(&e))?;
        zone.from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| fail(&format!("no such local time in {zone}")))
    }

    fn fill_defaults(&self, parsed: &mut Parsed) -> chrono::format::ParseResult<()> {
        let f = self.fields;
        if !f.year {
            parsed.set_year(0)?;
        }
        if !f.ordinal {
            if !f.month {
                parsed.set_month(1)?;
            }
            if !f.day {
                parsed.set_day(1)?;
            }
        }
        if !f.hour && !f.hour12 {
            parsed.set_hour(0)?;
        } else if f.hour12 && !f.meridiem && !f.hour {
            // Without a meridiem, 12 is noon and 1 through 11 are morning.
            parsed.set_ampm(parsed.hour_mod_12() == Some(0))?;
        }
        if !f.minute {
            parsed.set_minute(0)?;
        }
        if !f.second {
            parsed.set_second(0)?;
        }
        Ok(())
    }
}
