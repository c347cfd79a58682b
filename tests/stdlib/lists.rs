//! Integration tests for sequence functions

use quill_foundation::{ErrorKind, Limits, SemanticLimit, Type, Value};
use quill_stdlib::Context;

use crate::{call, call_in, eval, fail, ints, s, strs};

#[test]
fn list_and_tuple_collect_arguments() {
    assert_eq!(eval("list", &[Value::Int(1), s("a")]), Value::list([Value::Int(1), s("a")]));
    assert_eq!(eval("tuple", &[]), Value::list(Vec::<Value>::new()));
}

#[test]
fn push_and_prepend_leave_input_alone() {
    let base = ints(&[1, 2]);
    assert_eq!(eval("append", &[base.clone(), Value::Int(3)]), ints(&[1, 2, 3]));
    assert_eq!(eval("prepend", &[base.clone(), Value::Int(0)]), ints(&[0, 1, 2]));
    assert_eq!(base, ints(&[1, 2]));
}

#[test]
fn ends_of_a_sequence() {
    let seq = ints(&[1, 2, 3]);
    assert_eq!(eval("first", &[seq.clone()]), Value::Int(1));
    assert_eq!(eval("last", &[seq.clone()]), Value::Int(3));
    assert_eq!(eval("rest", &[seq.clone()]), ints(&[2, 3]));
    assert_eq!(eval("initial", &[seq]), ints(&[1, 2]));

    let empty = ints(&[]);
    for name in ["first", "last", "rest", "initial"] {
        assert_eq!(eval(name, &[empty.clone()]), Value::Nil, "{name}");
    }
}

#[test]
fn first_of_a_non_sequence() {
    let err = fail("mustFirst", &[s("abc")]);
    assert!(matches!(
        err.kind,
        ErrorKind::TypeMismatch { expected: Type::Vec, actual: Type::String }
    ));
    let err = fail("first", &[s("abc")]);
    assert!(err.is_abort());
}

#[test]
fn bytes_behave_as_integer_sequences() {
    let bytes = Value::bytes(b"AB".to_vec());
    assert_eq!(eval("first", &[bytes.clone()]), Value::Int(65));
    assert_eq!(eval("reverse", &[bytes]), ints(&[66, 65]));
}

#[test]
fn uniq_keeps_first_occurrences() {
    let seq = Value::list([Value::Int(1), s("1"), Value::Int(1), Value::Uint(1), s("1")]);
    assert_eq!(
        eval("uniq", &[seq]),
        Value::list([Value::Int(1), s("1"), Value::Uint(1)])
    );
}

#[test]
fn without_and_has() {
    let seq = strs(&["a", "b", "c", "b"]);
    assert_eq!(eval("without", &[seq.clone(), s("b"), s("z")]), strs(&["a", "c"]));
    assert_eq!(eval("has", &[s("c"), seq.clone()]), Value::Bool(true));
    assert_eq!(eval("has", &[Value::Int(1), seq]), Value::Bool(false));
    assert_eq!(eval("has", &[s("x"), Value::Nil]), Value::Bool(false));
    assert!(fail("mustHas", &[s("x"), s("xyz")]).root().kind.to_string().contains("type mismatch"));
}

#[test]
fn slice_clamps_bounds() {
    let seq = ints(&[1, 2, 3, 4, 5]);
    assert_eq!(eval("slice", &[seq.clone()]), seq);
    assert_eq!(eval("slice", &[seq.clone(), Value::Int(3)]), ints(&[4, 5]));
    assert_eq!(eval("slice", &[seq.clone(), Value::Int(1), Value::Int(3)]), ints(&[2, 3]));
    assert_eq!(eval("slice", &[seq.clone(), Value::Int(-4), Value::Int(99)]), seq);
    assert_eq!(eval("slice", &[seq, Value::Int(4), Value::Int(2)]), ints(&[]));
    assert_eq!(eval("slice", &[ints(&[]), Value::Int(1)]), Value::Nil);
}

#[test]
fn concat_flattens_one_level() {
    let out = eval("concat", &[ints(&[1]), ints(&[]), Value::list([ints(&[2, 3])])]);
    assert_eq!(out, Value::list([Value::Int(1), ints(&[2, 3])]));
    assert!(call("concat", &[ints(&[1]), Value::Int(2)]).is_err());
}

#[test]
fn compact_drops_empty_values() {
    let seq = Value::list([Value::Int(0), s(""), Value::Nil, s("a"), Value::Bool(false), Value::Int(7)]);
    assert_eq!(eval("compact", &[seq]), Value::list([s("a"), Value::Int(7)]));
}

#[test]
fn chunk_splits_evenly_with_a_short_tail() {
    let out = eval("chunk", &[Value::Int(3), ints(&[1, 2, 3, 4, 5, 6, 7])]);
    assert_eq!(
        out,
        Value::list([ints(&[1, 2, 3]), ints(&[4, 5, 6]), ints(&[7])])
    );
    assert_eq!(eval("chunk", &[Value::Int(2), ints(&[])]), ints(&[]));
}

#[test]
fn chunk_rejects_bad_sizes() {
    let err = fail("mustChunk", &[Value::Int(0), ints(&[1])]);
    assert!(matches!(err.kind, ErrorKind::InvalidArgument(_)));
}

#[test]
fn chunk_count_is_bounded() {
    let ctx = Context::new().with_limits(Limits::new().with_max_chunks(2));
    let seq = ints(&[1, 2, 3, 4, 5]);
    assert!(call_in(&ctx, "chunk", &[Value::Int(3), seq.clone()]).is_ok());
    let err = call_in(&ctx, "mustChunk", &[Value::Int(2), seq]).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::LimitExceeded(SemanticLimit::ChunkCount { limit: 2, requested: 3 })
    ));
}

#[test]
fn sort_alpha_sorts_text() {
    let seq = Value::list([s("b"), Value::Int(10), s("a"), Value::Int(2)]);
    assert_eq!(eval("sortAlpha", &[seq]), strs(&["10", "2", "a", "b"]));
    assert_eq!(eval("sortAlpha", &[Value::Int(5)]), strs(&["5"]));
}
