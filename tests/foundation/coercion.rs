//! Integration tests for the total coercions
//!
//! Every coercion must produce a value for every input, falling back to zero.

use proptest::prelude::*;
use quill_foundation::coerce::{as_sequence, format_float, is_empty, to_float64, to_int64, to_strings, to_text};
use quill_foundation::{Mapping, Value};

#[test]
fn to_int64_table() {
    let cases = [
        (Value::from("42"), 42),
        (Value::from("  42"), 0),
        (Value::from("0x10"), 0),
        (Value::Uint(u64::MAX), i64::MAX),
        (Value::Float(-3.9), -3),
        (Value::Float(f64::NAN), 0),
        (Value::Float(f64::INFINITY), i64::MAX),
        (Value::Bool(true), 1),
        (Value::Nil, 0),
        (Value::list([1_i64]), 0),
    ];
    for (input, expected) in cases {
        assert_eq!(to_int64(&input), expected, "{input:?}");
    }
}

#[test]
fn to_float64_table() {
    assert!((to_float64(&Value::from("2.5")) - 2.5).abs() < f64::EPSILON);
    assert!((to_float64(&Value::from("1e3")) - 1000.0).abs() < f64::EPSILON);
    assert!(to_float64(&Value::from("pi")).abs() < f64::EPSILON);
    assert!((to_float64(&Value::Int(-2)) + 2.0).abs() < f64::EPSILON);
    assert!(to_float64(&Value::Nil).abs() < f64::EPSILON);
}

#[test]
fn to_text_table() {
    assert_eq!(to_text(&Value::from("as is")), "as is");
    assert_eq!(to_text(&Value::bytes(b"hi".to_vec())), "hi");
    assert_eq!(to_text(&Value::Int(-5)), "-5");
    assert_eq!(to_text(&Value::Float(0.1)), "0.1");
    assert_eq!(to_text(&Value::Bool(false)), "false");
    assert_eq!(to_text(&Value::Nil), "<nil>");
}

#[test]
fn to_strings_skips_nil_elements() {
    let mixed = Value::list([Value::Int(1), Value::Nil, Value::from("two")]);
    assert_eq!(to_strings(&mixed), ["1", "two"]);
    assert!(to_strings(&Value::Nil).is_empty());
    assert_eq!(to_strings(&Value::Float(2.0)), ["2"]);
}

#[test]
fn bytes_are_a_sequence_of_integers() {
    let seq = as_sequence(&Value::bytes(vec![7_u8, 8])).unwrap();
    assert_eq!(seq.iter().cloned().collect::<Vec<_>>(), [Value::Int(7), Value::Int(8)]);
    assert!(as_sequence(&Value::from("abc")).is_none());
}

#[test]
fn emptiness() {
    for value in [
        Value::Nil,
        Value::Bool(false),
        Value::Int(0),
        Value::Uint(0),
        Value::Float(0.0),
        Value::from(""),
        Value::list(Vec::<Value>::new()),
        Value::Map(Mapping::new()),
    ] {
        assert!(is_empty(&value), "{value:?}");
    }
    for value in [Value::from(" "), Value::Int(-1), Value::list([Value::Nil])] {
        assert!(!is_empty(&value), "{value:?}");
    }
}

#[test]
fn float_formatting() {
    assert_eq!(format_float(3.0), "3");
    assert_eq!(format_float(-0.0), "-0");
    assert_eq!(format_float(123_456.0), "123456");
    assert_eq!(format_float(1_234_567.0), "1.234567e+06");
    assert_eq!(format_float(0.000_25), "0.00025");
    assert_eq!(format_float(0.000_025), "2.5e-05");
    assert_eq!(format_float(f64::NEG_INFINITY), "-Inf");
}

proptest! {
    #[test]
    fn int_text_round_trips(n: i64) {
        prop_assert_eq!(to_int64(&Value::from(to_text(&Value::Int(n)))), n);
    }

    #[test]
    fn float_text_round_trips(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        let text = format_float(f);
        let parsed: f64 = text.parse().unwrap();
        prop_assert_eq!(parsed.to_bits(), f.to_bits());
    }

    #[test]
    fn to_int64_never_panics(s in ".*") {
        let _ = to_int64(&Value::from(s.as_str()));
    }
}
