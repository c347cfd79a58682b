//! Emptiness-driven defaults and flow control.

use quill_foundation::coerce::is_empty;
use quill_foundation::{Error, ErrorKind, Result, Value};

use crate::args;
use crate::context::Context;

/// Flow: default - the given value, or `d` when it is absent or empty
pub(crate) fn native_default(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let fallback = args::nth(args, 0)?;
    match args::optional(args, 1) {
        Some(given) if !is_empty(given) => Ok(given.clone()),
        _ => Ok(fallback.clone()),
    }
}

/// Flow: empty
pub(crate) fn native_empty(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(is_empty(args::nth(args, 0)?)))
}

/// Flow: coalesce - first non-empty argument, or nil
pub(crate) fn native_coalesce(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(args
        .iter()
        .find(|v| !is_empty(v))
        .cloned()
        .unwrap_or(Value::Nil))
}

/// Flow: all - true when no argument is empty
pub(crate) fn native_all(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(args.iter().all(|v| !is_empty(v))))
}

/// Flow: any - true when some argument is non-empty
pub(crate) fn native_any(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(args.iter().any(|v| !is_empty(v))))
}

/// Flow: ternary - `a` when the condition holds, else `b`
pub(crate) fn native_ternary(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let when_true = args::nth(args, 0)?;
    let when_false = args::nth(args, 1)?;
    let condition = args::boolean(args, 2)?;
    Ok(if condition { when_true } else { when_false }.clone())
}

/// Flow: fail - always errors with the given message
pub(crate) fn native_fail(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let message = args::string(args, 0)?;
    Err(Error::new(ErrorKind::Failed(message.to_string())))
}
