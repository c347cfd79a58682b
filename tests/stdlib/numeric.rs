//! Integration tests for numeric, default, and reflection functions

use quill_foundation::{ErrorKind, Limits, SemanticLimit, Value};
use quill_stdlib::Context;

use crate::{call, call_in, eval, fail, ints, s};

// =============================================================================
// Arithmetic
// =============================================================================

#[test]
fn integer_arithmetic_coerces_operands() {
    assert_eq!(eval("add", &[Value::Int(1), s("2"), Value::Float(3.7)]), Value::Int(6));
    assert_eq!(eval("add1", &[s("41")]), Value::Int(42));
    assert_eq!(eval("sub", &[Value::Int(3), Value::Int(5)]), Value::Int(-2));
    assert_eq!(eval("mul", &[Value::Int(2), Value::Int(3), Value::Int(4)]), Value::Int(24));
    assert_eq!(eval("div", &[Value::Int(-7), Value::Int(2)]), Value::Int(-3));
    assert_eq!(eval("mod", &[Value::Int(-7), Value::Int(2)]), Value::Int(-1));
    assert_eq!(eval("add", &[Value::Int(i64::MAX), Value::Int(1)]), Value::Int(i64::MIN));
}

#[test]
fn division_by_zero_aborts() {
    for name in ["div", "mod"] {
        let err = fail(name, &[Value::Int(1), Value::Int(0)]);
        assert!(err.is_abort(), "{name}");
        assert!(matches!(err.root().kind, ErrorKind::DivisionByZero));
    }
}

#[test]
fn extremes() {
    assert_eq!(eval("max", &[Value::Int(1), s("9"), Value::Int(3)]), Value::Int(9));
    assert_eq!(eval("biggest", &[Value::Int(-1)]), Value::Int(-1));
    assert_eq!(eval("min", &[Value::Int(4), Value::Int(-2)]), Value::Int(-2));
    assert_eq!(eval("maxf", &[Value::Float(1.5), Value::Int(1)]), Value::Float(1.5));
    assert_eq!(eval("minf", &[Value::Float(1.5), s("0.25")]), Value::Float(0.25));
    assert_eq!(eval("ceil", &[s("1.2")]), Value::Float(2.0));
    assert_eq!(eval("floor", &[Value::Float(-1.2)]), Value::Float(-2.0));
}

#[test]
fn round_with_threshold() {
    assert_eq!(eval("round", &[Value::Float(2.5), Value::Int(0)]), Value::Float(3.0));
    assert_eq!(
        eval("round", &[Value::Float(2.5), Value::Int(0), Value::Float(0.6)]),
        Value::Float(2.0)
    );
    assert_eq!(eval("round", &[Value::Float(1.25), Value::Int(1)]), Value::Float(1.3));
    assert!(call("round", &[Value::Float(1.0)]).is_err());
}

#[test]
fn parsing_numbers() {
    assert_eq!(eval("atoi", &[s("123")]), Value::Int(123));
    assert_eq!(eval("atoi", &[s("12a")]), Value::Int(0));
    assert_eq!(eval("toDecimal", &[s("0777")]), Value::Int(511));
    assert_eq!(eval("toDecimal", &[Value::Int(17)]), Value::Int(15));
    assert_eq!(eval("toDecimal", &[s("9")]), Value::Int(0));
    assert_eq!(eval("int64", &[Value::Uint(u64::MAX)]), Value::Int(i64::MAX));
    assert_eq!(eval("int", &[s("abc")]), Value::Int(0));
    assert_eq!(eval("float64", &[Value::Bool(true)]), Value::Float(1.0));
}

#[test]
fn rand_int_is_seeded_and_bounded() {
    let draw = |seed| {
        let ctx = Context::new().with_seed(seed);
        (0..20)
            .map(|_| call_in(&ctx, "randInt", &[Value::Int(-3), Value::Int(3)]).unwrap())
            .collect::<Vec<_>>()
    };
    let first = draw(7);
    assert_eq!(first, draw(7));
    for value in &first {
        let n = value.as_int().unwrap();
        assert!((-3..3).contains(&n));
    }
    assert!(fail("randInt", &[Value::Int(3), Value::Int(3)]).is_abort());
}

// =============================================================================
// Ranges
// =============================================================================

#[test]
fn until_and_until_step() {
    assert_eq!(eval("until", &[Value::Int(3)]), ints(&[0, 1, 2]));
    assert_eq!(eval("until", &[Value::Int(-3)]), ints(&[0, -1, -2]));
    assert_eq!(
        eval("untilStep", &[Value::Int(0), Value::Int(10), Value::Int(4)]),
        ints(&[0, 4, 8])
    );
    assert_eq!(
        eval("untilStep", &[Value::Int(10), Value::Int(0), Value::Int(-3)]),
        ints(&[10, 7, 4, 1])
    );
    assert_eq!(eval("untilStep", &[Value::Int(0), Value::Int(5), Value::Int(0)]), ints(&[]));
    assert_eq!(eval("untilStep", &[Value::Int(0), Value::Int(5), Value::Int(-1)]), ints(&[]));
}

#[test]
fn ranges_respect_the_loop_ceiling() {
    let ctx = Context::new().with_limits(Limits::new().with_max_loop_iterations(10));
    assert!(call_in(&ctx, "until", &[Value::Int(10)]).is_ok());
    let err = call_in(&ctx, "until", &[Value::Int(11)]).unwrap_err();
    assert!(matches!(
        err.root().kind,
        ErrorKind::LimitExceeded(SemanticLimit::LoopIterations { limit: 10, requested: 11 })
    ));
    assert!(call_in(&ctx, "seq", &[Value::Int(20)]).is_err());
    assert!(call("until", &[Value::Int(1_000_000_000)]).is_err());
}

#[test]
fn seq_forms() {
    assert_eq!(eval("seq", &[]), s(""));
    assert_eq!(eval("seq", &[Value::Int(3)]), s("1 2 3"));
    assert_eq!(eval("seq", &[Value::Int(-2)]), s("1 0 -1 -2"));
    assert_eq!(eval("seq", &[Value::Int(2), Value::Int(5)]), s("2 3 4 5"));
    assert_eq!(eval("seq", &[Value::Int(5), Value::Int(3)]), s("5 4 3"));
    assert_eq!(eval("seq", &[Value::Int(0), Value::Int(3), Value::Int(9)]), s("0 3 6 9"));
    assert_eq!(eval("seq", &[Value::Int(9), Value::Int(-3), Value::Int(0)]), s("9 6 3 0"));
    assert_eq!(eval("seq", &[Value::Int(9), Value::Int(3), Value::Int(0)]), s(""));
    assert_eq!(eval("seq", &[Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)]), s(""));
}

// =============================================================================
// Defaults and flow
// =============================================================================

#[test]
fn defaults() {
    assert_eq!(eval("default", &[s("d")]), s("d"));
    assert_eq!(eval("default", &[s("d"), s("")]), s("d"));
    assert_eq!(eval("default", &[s("d"), Value::Int(0)]), s("d"));
    assert_eq!(eval("default", &[s("d"), s("given")]), s("given"));
    assert_eq!(eval("coalesce", &[Value::Nil, s(""), Value::Int(2)]), Value::Int(2));
    assert_eq!(eval("coalesce", &[Value::Nil]), Value::Nil);
    assert_eq!(eval("empty", &[ints(&[])]), Value::Bool(true));
    assert_eq!(eval("all", &[Value::Int(1), s("x")]), Value::Bool(true));
    assert_eq!(eval("any", &[Value::Int(0), s("")]), Value::Bool(false));
    assert_eq!(eval("ternary", &[s("yes"), s("no"), Value::Bool(false)]), s("no"));
}

#[test]
fn fail_is_strict() {
    let err = fail("fail", &[s("stop here")]);
    assert!(!err.is_abort());
    assert_eq!(err.to_string(), "stop here");
}

// =============================================================================
// Reflection
// =============================================================================

#[test]
fn reflection() {
    assert_eq!(eval("typeOf", &[Value::Int(1)]), s("int64"));
    assert_eq!(eval("typeOf", &[Value::Nil]), s("<nil>"));
    assert_eq!(eval("typeIs", &[s("string"), s("x")]), Value::Bool(true));
    assert_eq!(eval("kindOf", &[ints(&[1])]), s("slice"));
    assert_eq!(eval("kindIs", &[s("map"), crate::dict(&[])]), Value::Bool(true));
    assert_eq!(eval("deepEqual", &[ints(&[1, 2]), ints(&[1, 2])]), Value::Bool(true));
    assert_eq!(eval("deepEqual", &[Value::Int(1), Value::Uint(1)]), Value::Bool(false));
}
