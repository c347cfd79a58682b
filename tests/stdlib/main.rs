//! Integration tests for Layer 1: Stdlib
//!
//! Every test goes through [`Registry::call`] so that arity checks and the
//! strict/convenience forms are exercised along with each function.

use quill_foundation::{Error, Mapping, Result, Value};
use quill_stdlib::{Context, Registry};

mod dates;
mod dicts;
mod json;
mod lists;
mod numeric;

/// Calls `name` in a default context.
pub fn call(name: &str, args: &[Value]) -> Result<Value> {
    call_in(&Context::new(), name, args)
}

/// Calls `name` in the given context.
pub fn call_in(ctx: &Context, name: &str, args: &[Value]) -> Result<Value> {
    Registry::standard().call(ctx, name, args)
}

/// Calls `name` and unwraps the result.
pub fn eval(name: &str, args: &[Value]) -> Value {
    call(name, args).unwrap_or_else(|err| panic!("{name} failed: {err}"))
}

/// Calls `name`, expecting an error, and returns it.
pub fn fail(name: &str, args: &[Value]) -> Error {
    match call(name, args) {
        Ok(value) => panic!("{name} returned {value:?}"),
        Err(err) => err,
    }
}

pub fn s(text: &str) -> Value {
    Value::from(text)
}

pub fn ints(items: &[i64]) -> Value {
    Value::list(items.iter().copied())
}

pub fn strs(items: &[&str]) -> Value {
    Value::list(items.iter().copied())
}

pub fn dict(pairs: &[(&str, Value)]) -> Value {
    Value::Map(pairs.iter().map(|(k, v)| (*k, v.clone())).collect::<Mapping>())
}
