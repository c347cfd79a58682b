//! Integration tests for date, time, and duration functions

use chrono::TimeZone;
use chrono_tz::Tz;
use quill_foundation::{ErrorKind, Value};
use quill_stdlib::{Clock, Context, duration};

use crate::{call_in, s};

fn ctx() -> Context {
    let now = Tz::UTC.with_ymd_and_hms(2024, 3, 10, 8, 30, 0).unwrap();
    Context::new().with_fixed_now(now)
}

fn at(zone: Tz, y: i32, mo: u32, d: u32, h: u32, mi: u32, sec: u32) -> Value {
    Value::Time(zone.with_ymd_and_hms(y, mo, d, h, mi, sec).unwrap())
}

fn run(ctx: &Context, name: &str, args: &[Value]) -> Value {
    call_in(ctx, name, args).unwrap_or_else(|err| panic!("{name} failed: {err}"))
}

#[test]
fn fixed_clock_drives_now() {
    let ctx = ctx();
    assert!(matches!(ctx.clock(), Clock::Fixed(_)));
    assert_eq!(run(&ctx, "now", &[]), at(Tz::UTC, 2024, 3, 10, 8, 30, 0));
}

#[test]
fn reference_layouts() {
    let ctx = ctx();
    let t = at(Tz::UTC, 2009, 11, 10, 23, 4, 5);
    let fmt = |layout: &str| run(&ctx, "date", &[s(layout), t.clone()]);
    assert_eq!(fmt("2006-01-02"), s("2009-11-10"));
    assert_eq!(fmt("Jan 2, 2006 at 3:04pm"), s("Nov 10, 2009 at 11:04pm"));
    assert_eq!(fmt("Monday 02/01/06"), s("Tuesday 10/11/09"));
    assert_eq!(fmt("15:04:05 MST"), s("23:04:05 UTC"));
    assert_eq!(fmt("2006-01-02T15:04:05Z07:00"), s("2009-11-10T23:04:05Z"));
}

#[test]
fn zones_shift_the_wall_clock() {
    let ctx = ctx().with_zone(chrono_tz::America::New_York);
    let t = at(Tz::UTC, 2024, 7, 1, 12, 0, 0);
    assert_eq!(run(&ctx, "date", &[s("15:04 -0700"), t.clone()]), s("08:00 -0400"));
    assert_eq!(
        run(&ctx, "dateInZone", &[s("15:04"), t.clone(), s("Asia/Kolkata")]),
        s("17:30")
    );
    assert_eq!(run(&ctx, "htmlDate", &[t.clone()]), s("2024-07-01"));
    assert_eq!(run(&ctx, "htmlDateInZone", &[t, s("Pacific/Auckland")]), s("2024-07-02"));
}

#[test]
fn epoch_seconds_are_accepted_as_times() {
    let ctx = ctx();
    assert_eq!(
        run(&ctx, "date", &[s("2006-01-02 15:04:05"), Value::Int(86_400)]),
        s("1970-01-02 00:00:00")
    );
    assert_eq!(run(&ctx, "unixEpoch", &[at(Tz::UTC, 1970, 1, 2, 0, 0, 0)]), s("86400"));
}

#[test]
fn parsing_dates() {
    let ctx = ctx().with_zone(chrono_tz::Europe::Paris);
    let parsed = run(&ctx, "toDate", &[s("2006-01-02 15:04"), s("2024-01-15 10:00")]);
    assert_eq!(parsed, at(chrono_tz::Europe::Paris, 2024, 1, 15, 10, 0, 0));

    let with_offset = run(
        &ctx,
        "mustToDate",
        &[s("2006-01-02T15:04:05Z07:00"), s("2024-01-15T10:00:00Z")],
    );
    assert_eq!(with_offset, at(chrono_tz::Europe::Paris, 2024, 1, 15, 11, 0, 0));

    let zero = run(&ctx, "toDate", &[s("2006-01-02"), s("not a date")]);
    assert_eq!(zero, at(Tz::UTC, 1, 1, 1, 0, 0, 0));

    let err = call_in(&ctx, "mustToDate", &[s("2006-01-02"), s("2024-13-01")]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ParseError { .. }));
}

#[test]
fn modifying_dates() {
    let ctx = ctx();
    let t = at(Tz::UTC, 2024, 2, 28, 23, 0, 0);
    assert_eq!(run(&ctx, "dateModify", &[s("2h"), t.clone()]), at(Tz::UTC, 2024, 2, 29, 1, 0, 0));
    assert_eq!(run(&ctx, "dateModify", &[s("-90m"), t.clone()]), at(Tz::UTC, 2024, 2, 28, 21, 30, 0));
    assert_eq!(run(&ctx, "dateModify", &[s("tomorrow"), t.clone()]), t.clone());
    let err = call_in(&ctx, "mustDateModify", &[s("tomorrow"), t]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ParseError { .. }));
}

#[test]
fn elapsed_time() {
    let ctx = ctx();
    assert_eq!(run(&ctx, "ago", &[at(Tz::UTC, 2024, 3, 10, 6, 0, 0)]), s("2h30m0s"));
    assert_eq!(run(&ctx, "durationRound", &[at(Tz::UTC, 2024, 1, 1, 0, 0, 0)]), s("2mo"));
    assert_eq!(run(&ctx, "duration", &[Value::Int(90)]), s("1m30s"));
    assert_eq!(run(&ctx, "durationRound", &[s("49h")]), s("2d"));
}

#[test]
fn duration_text_round_trips() {
    for text in ["1h0m0s", "2h45m30.5s", "1.5ms", "-3m0s", "250ns"] {
        let nanos = duration::parse(text).unwrap();
        assert_eq!(duration::format(nanos), text);
    }
}
