//! Integration tests for JSON encoding and decoding

use quill_foundation::{ErrorKind, Mapping, Value};

use crate::{call, dict, eval, fail, ints, s};

#[test]
fn compact_output_sorts_keys() {
    let value = dict(&[
        ("b", ints(&[1, 2])),
        ("a", Value::Nil),
        ("c", dict(&[("x", Value::Bool(true))])),
    ]);
    assert_eq!(
        eval("toJSON", &[value]),
        s(r#"{"a":null,"b":[1,2],"c":{"x":true}}"#)
    );
}

#[test]
fn pretty_output_indents_two_spaces() {
    let value = dict(&[("k", ints(&[1]))]);
    assert_eq!(eval("toPrettyJSON", &[value]), s("{\n  \"k\": [\n    1\n  ]\n}"));
}

#[test]
fn html_characters_are_escaped_unless_raw() {
    let value = s("<a&b>");
    assert_eq!(eval("toJSON", &[value.clone()]), s(r#""\u003ca\u0026b\u003e""#));
    assert_eq!(eval("toRawJSON", &[value]), s(r#""<a&b>""#));
}

#[test]
fn numbers_encode_naturally() {
    assert_eq!(eval("toJSON", &[Value::Float(3.0)]), s("3"));
    assert_eq!(eval("toJSON", &[Value::Float(0.5)]), s("0.5"));
    assert_eq!(eval("toJSON", &[Value::Uint(u64::MAX)]), s("18446744073709551615"));
}

#[test]
fn non_finite_floats_fail_only_in_strict_forms() {
    assert_eq!(eval("toJSON", &[Value::Float(f64::NAN)]), s(""));
    let err = fail("mustToJSON", &[Value::Float(f64::INFINITY)]);
    assert!(matches!(err.kind, ErrorKind::InvalidArgument(_)));
    assert!(fail("toRawJSON", &[Value::Float(f64::NAN)]).is_abort());
}

#[test]
fn self_referencing_mapping_is_an_error() {
    let m = Mapping::new();
    m.insert("me", Value::Map(m.clone()));
    assert!(call("mustToJSON", &[Value::Map(m.clone())]).is_err());
    assert_eq!(eval("toJSON", &[Value::Map(m)]), s(""));
}

#[test]
fn decoding_picks_number_variants() {
    let out = eval("fromJSON", &[s(r#"{"i":-1,"u":18446744073709551615,"f":1.5,"l":["x",null]}"#)]);
    assert_eq!(
        out,
        dict(&[
            ("i", Value::Int(-1)),
            ("u", Value::Uint(u64::MAX)),
            ("f", Value::Float(1.5)),
            ("l", Value::list([s("x"), Value::Nil])),
        ])
    );
}

#[test]
fn malformed_text() {
    assert_eq!(eval("fromJSON", &[s("{nope")]), Value::Nil);
    let err = fail("mustFromJSON", &[s("{nope")]);
    assert!(matches!(err.kind, ErrorKind::ParseError { .. }));
}

#[test]
fn round_trip_is_structural() {
    let value = dict(&[
        ("name", s("quill")),
        ("tags", Value::list([s("a"), s("b")])),
        ("nested", dict(&[("n", Value::Int(3)), ("ok", Value::Bool(false))])),
    ]);
    let text = eval("mustToJSON", &[value.clone()]);
    assert_eq!(eval("mustFromJSON", &[text]), value);
}
