//! Runtime type and kind inspection.

use quill_foundation::{Result, Value};

use crate::args;
use crate::context::Context;

/// Reflection: typeOf
pub(crate) fn native_type_of(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(args::text(args::nth(args, 0)?.type_name()))
}

/// Reflection: typeIs
pub(crate) fn native_type_is(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let target = args::string(args, 0)?;
    Ok(Value::Bool(args::nth(args, 1)?.type_name() == target))
}

/// Reflection: typeIsLike - also matches the pointer form `*T`
pub(crate) fn native_type_is_like(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let target = args::string(args, 0)?;
    let name = args::nth(args, 1)?.type_name();
    Ok(Value::Bool(
        name == target || name.strip_prefix('*') == Some(target),
    ))
}

/// Reflection: kindOf
pub(crate) fn native_kind_of(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(args::text(args::nth(args, 0)?.kind_name()))
}

/// Reflection: kindIs
pub(crate) fn native_kind_is(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let target = args::string(args, 0)?;
    Ok(Value::Bool(args::nth(args, 1)?.kind_name() == target))
}

/// Reflection: deepEqual
pub(crate) fn native_deep_equal(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(args::nth(args, 0)? == args::nth(args, 1)?))
}
