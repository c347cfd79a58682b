//! Integration tests for mapping functions

use quill_foundation::{ErrorKind, Type, Value};

use crate::{call, dict, eval, fail, ints, s};

fn sorted_texts(value: &Value) -> Vec<String> {
    let mut out: Vec<String> = value
        .as_vec()
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();
    out.sort();
    out
}

#[test]
fn dict_pairs_arguments() {
    let out = eval("dict", &[s("a"), Value::Int(1), Value::Int(2), s("two")]);
    assert_eq!(out, dict(&[("a", Value::Int(1)), ("2", s("two"))]));
    let odd = eval("dict", &[s("lonely")]);
    assert_eq!(odd, dict(&[("lonely", s(""))]));
}

#[test]
fn get_missing_key_is_empty_string() {
    let m = dict(&[("name", s("quill"))]);
    assert_eq!(eval("get", &[m.clone(), s("name")]), s("quill"));
    assert_eq!(eval("get", &[m, s("nope")]), s(""));
}

#[test]
fn set_and_unset_mutate_the_shared_mapping() {
    let m = dict(&[("a", Value::Int(1))]);
    let returned = eval("set", &[m.clone(), s("b"), Value::Int(2)]);
    assert_eq!(returned, m);
    assert_eq!(eval("hasKey", &[m.clone(), s("b")]), Value::Bool(true));

    eval("unset", &[m.clone(), s("a")]);
    assert_eq!(m, dict(&[("b", Value::Int(2))]));
    eval("unset", &[m.clone(), s("never-there")]);
    assert_eq!(m, dict(&[("b", Value::Int(2))]));
}

#[test]
fn mapping_arguments_are_type_checked() {
    let err = fail("hasKey", &[ints(&[1]), s("a")]);
    assert!(matches!(
        err.root().kind,
        ErrorKind::TypeMismatch { expected: Type::Map, actual: Type::Vec }
    ));
}

#[test]
fn pick_and_omit_build_new_mappings() {
    let m = dict(&[("a", Value::Int(1)), ("b", Value::Int(2)), ("c", Value::Int(3))]);
    assert_eq!(
        eval("pick", &[m.clone(), s("a"), s("c"), s("z")]),
        dict(&[("a", Value::Int(1)), ("c", Value::Int(3))])
    );
    assert_eq!(eval("omit", &[m.clone(), s("a"), s("b")]), dict(&[("c", Value::Int(3))]));
    assert_eq!(m.as_map().unwrap().len(), 3);
}

#[test]
fn keys_values_and_pluck() {
    let one = dict(&[("a", Value::Int(1)), ("b", Value::Int(2))]);
    let two = dict(&[("a", Value::Int(3))]);
    assert_eq!(sorted_texts(&eval("keys", &[one.clone(), two.clone()])), ["a", "a", "b"]);
    assert_eq!(sorted_texts(&eval("values", &[one.clone()])), ["1", "2"]);
    assert_eq!(sorted_texts(&eval("pluck", &[s("b"), one, two])), ["2"]);
    assert_eq!(eval("keys", &[]), Value::list(Vec::<Value>::new()));
}

#[test]
fn dig_walks_nested_mappings() {
    let tree = dict(&[(
        "user",
        dict(&[("role", dict(&[("name", s("admin"))])), ("age", Value::Int(40))]),
    )]);
    let dig = |keys: &[&str]| {
        let mut args: Vec<Value> = keys.iter().map(|k| s(k)).collect();
        args.push(s("fallback"));
        args.push(tree.clone());
        eval("dig", &args)
    };
    assert_eq!(dig(&["user", "role", "name"]), s("admin"));
    assert_eq!(dig(&["user", "age"]), Value::Int(40));
    assert_eq!(dig(&["user", "missing"]), s("fallback"));
    assert_eq!(dig(&["user", "age", "deeper"]), s("fallback"));
}

#[test]
fn dig_needs_a_mapping_last() {
    assert!(call("dig", &[s("a"), s("default"), s("not a map")]).is_err());
    assert!(call("dig", &[s("a"), s("default")]).is_err());
}
