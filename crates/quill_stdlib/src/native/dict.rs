//! String-keyed mapping operations.
//!
//! `set` and `unset` mutate the caller's mapping through its shared handle
//! and hand the same handle back; every other operation builds a new value.

use std::sync::Arc;

use quill_foundation::coerce::to_text;
use quill_foundation::{Entries, Mapping, Result, Value};

use crate::args;
use crate::context::Context;

/// Inserts `key → value` and returns the same entries.
pub fn set_entry<'a>(entries: &'a mut Entries, key: &str, value: Value) -> &'a mut Entries {
    entries.insert(Arc::from(key), value);
    entries
}

/// Removes `key` and returns the same entries.
pub fn unset_entry<'a>(entries: &'a mut Entries, key: &str) -> &'a mut Entries {
    entries.remove(key);
    entries
}

/// Dict: get - value under key, or `""` when absent
pub(crate) fn native_get(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let map = args::mapping(args, 0)?;
    let key = args::string(args, 1)?;
    Ok(map.get(key).unwrap_or_else(|| args::text("")))
}

/// Dict: set
pub(crate) fn native_set(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let map = args::mapping(args, 0)?;
    let key = args::string(args, 1)?;
    let value = args::nth(args, 2)?.clone();
    map.with_mut(|entries| {
        set_entry(entries, key, value);
    });
    Ok(Value::Map(map.clone()))
}

/// Dict: unset
pub(crate) fn native_unset(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let map = args::mapping(args, 0)?;
    let key = args::string(args, 1)?;
    map.with_mut(|entries| {
        unset_entry(entries, key);
    });
    Ok(Value::Map(map.clone()))
}

/// Dict: hasKey
pub(crate) fn native_has_key(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let map = args::mapping(args, 0)?;
    let key = args::string(args, 1)?;
    Ok(Value::Bool(map.contains_key(key)))
}

/// Dict: pluck - the value under `key` from each mapping that has it
pub(crate) fn native_pluck(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let key = args::string(args, 0)?;
    let mut out = Vec::new();
    for index in 1..args.len() {
        if let Some(value) = args::mapping(args, index)?.get(key) {
            out.push(value);
        }
    }
    Ok(Value::list(out))
}

/// Dict: keys - keys of every mapping, duplicates kept
pub(crate) fn native_keys(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let mut out = Vec::new();
    for index in 0..args.len() {
        out.extend(args::mapping(args, index)?.keys());
    }
    Ok(Value::list(out))
}

/// Dict: pick - new mapping restricted to the named keys
pub(crate) fn native_pick(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let map = args::mapping(args, 0)?;
    let mut picked = Entries::new();
    for index in 1..args.len() {
        let key = args::string(args, index)?;
        if let Some(value) = map.get(key) {
            picked.insert(Arc::from(key), value);
        }
    }
    Ok(Value::Map(picked.into()))
}

/// Dict: omit - new mapping without the named keys
pub(crate) fn native_omit(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let map = args::mapping(args, 0)?;
    let mut kept = map.snapshot();
    for index in 1..args.len() {
        kept.remove(args::string(args, index)?);
    }
    Ok(Value::Map(kept.into()))
}

/// Dict: values
pub(crate) fn native_values(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let map = args::mapping(args, 0)?;
    Ok(Value::list(map.values()))
}

/// Dict: dict - build from alternating keys and values
pub(crate) fn native_dict(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let map: Mapping = args
        .chunks(2)
        .map(|pair| {
            let key = to_text(&pair[0]);
            let value = pair.get(1).cloned().unwrap_or_else(|| args::text(""));
            (key, value)
        })
        .collect();
    Ok(Value::Map(map))
}

/// Dict: dig - walk nested mappings, falling back to a default
///
/// Arguments are `keys..., default, mapping`.
pub(crate) fn native_dig(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let last = args.len().saturating_sub(1);
    let mut current = args::mapping(args, last)?.clone();
    let default = args::nth(args, last.saturating_sub(1))?;
    let key_count = last.saturating_sub(1);

    for index in 0..key_count {
        let key = args::string(args, index)?;
        let Some(step) = current.get(key) else {
            return Ok(default.clone());
        };
        if index + 1 == key_count {
            return Ok(step);
        }
        match step {
            Value::Map(next) => current = next,
            _ => return Ok(default.clone()),
        }
    }
    Ok(default.clone())
}
