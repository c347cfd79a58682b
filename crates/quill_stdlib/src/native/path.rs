//! Lexical path manipulation.
//!
//! Nothing here touches the file system. The plain functions always use `/`;
//! the `os*` variants use the platform separator.

use std::path::{MAIN_SEPARATOR, Path};

use quill_foundation::{Result, Value};

use crate::args;
use crate::context::Context;

/// Returns the shortest lexically equivalent path.
///
/// Repeated separators collapse, `.` elements drop, and each `..` removes
/// the element before it. A `..` that would climb above a rooted path is
/// discarded. An empty result is `"."`.
#[must_use]
pub fn clean(path: &str, sep: char) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let rooted = path.starts_with(sep);
    let mut parts: Vec<&str> = Vec::new();
    for element in path.split(sep) {
        match element {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !rooted {
                    parts.push("..");
                }
            }
            name => parts.push(name),
        }
    }
    let joined = parts.join(sep.to_string().as_str());
    if rooted {
        format!("{sep}{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Returns the last element of the path, ignoring trailing separators.
#[must_use]
pub fn base(path: &str, sep: char) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let trimmed = path.trim_end_matches(sep);
    if trimmed.is_empty() {
        return sep.to_string();
    }
    trimmed
        .rsplit_once(sep)
        .map_or(trimmed, |(_, last)| last)
        .to_string()
}

/// Returns everything but the last element, cleaned.
#[must_use]
pub fn dir(path: &str, sep: char) -> String {
    let head = path.rfind(sep).map_or("", |i| &path[..=i]);
    clean(head, sep)
}

/// Returns the extension of the last element, including the dot.
#[must_use]
pub fn ext(path: &str, sep: char) -> &str {
    let last = path.rfind(sep).map_or(path, |i| &path[i + 1..]);
    last.rfind('.').map_or("", |i| &last[i..])
}

/// Path: base
pub(crate) fn native_base(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(args::text(base(args::string(args, 0)?, '/')))
}

/// Path: dir
pub(crate) fn native_dir(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(args::text(dir(args::string(args, 0)?, '/')))
}

/// Path: clean
pub(crate) fn native_clean(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(args::text(clean(args::string(args, 0)?, '/')))
}

/// Path: ext
pub(crate) fn native_ext(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(args::text(ext(args::string(args, 0)?, '/')))
}

/// Path: isAbs
pub(crate) fn native_is_abs(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(args::string(args, 0)?.starts_with('/')))
}

/// Path: osBase
pub(crate) fn native_os_base(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(args::text(base(args::string(args, 0)?, MAIN_SEPARATOR)))
}

/// Path: osClean
pub(crate) fn native_os_clean(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(args::text(clean(args::string(args, 0)?, MAIN_SEPARATOR)))
}

/// Path: osDir
pub(crate) fn native_os_dir(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(args::text(dir(args::string(args, 0)?, MAIN_SEPARATOR)))
}

/// Path: osExt
pub(crate) fn native_os_ext(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(args::text(ext(args::string(args, 0)?, MAIN_SEPARATOR)))
}

/// Path: osIsAbs
pub(crate) fn native_os_is_abs(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(Path::new(args::string(args, 0)?).is_absolute()))
}
