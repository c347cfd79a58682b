//! Regular expressions.
//!
//! Patterns are compiled per call. A pattern that fails to compile is a
//! parse error, except in the lenient `regexMatch`, which reports no match.

use quill_foundation::{Error, ErrorKind, Result, Value};
use regex::{NoExpand, Regex};

use crate::args;
use crate::context::Context;

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::parse(format!("invalid regular expression: {e}")))
}

/// Converts a count argument to a match limit; negative means unlimited.
fn limit(n: i64) -> Option<usize> {
    usize::try_from(n).ok()
}

/// Pattern: regexMatch - false when the pattern does not compile
pub(crate) fn native_regex_match(ctx: &Context, args: &[Value]) -> Result<Value> {
    match native_must_regex_match(ctx, args) {
        Err(e) if matches!(e.kind, ErrorKind::ParseError { .. }) => {
            Ok(Value::Bool(false))
        }
        other => other,
    }
}

/// Pattern: mustRegexMatch
pub(crate) fn native_must_regex_match(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let re = compile(args::string(args, 0)?)?;
    Ok(Value::Bool(re.is_match(args::string(args, 1)?)))
}

/// Pattern: regexFindAll - up to `n` matches, all when `n` is negative
pub(crate) fn native_regex_find_all(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let re = compile(args::string(args, 0)?)?;
    let s = args::string(args, 1)?;
    let n = args::int(args, 2)?;
    let matches = re.find_iter(s).map(|m| m.as_str());
    let found: Vec<&str> = match limit(n) {
        Some(n) => matches.take(n).collect(),
        None => matches.collect(),
    };
    Ok(Value::list(found))
}

/// Pattern: regexFind - first match, or `""`
pub(crate) fn native_regex_find(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let re = compile(args::string(args, 0)?)?;
    let s = args::string(args, 1)?;
    Ok(args::text(re.find(s).map_or("", |m| m.as_str())))
}

/// Pattern: regexReplaceAll - `$1` and `${name}` expand in the replacement
pub(crate) fn native_regex_replace_all(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let re = compile(args::string(args, 0)?)?;
    let s = args::string(args, 1)?;
    let replacement = args::string(args, 2)?;
    Ok(args::text(re.replace_all(s, replacement)))
}

/// Pattern: regexReplaceAllLiteral - replacement inserted verbatim
pub(crate) fn native_regex_replace_all_literal(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let re = compile(args::string(args, 0)?)?;
    let s = args::string(args, 1)?;
    let replacement = args::string(args, 2)?;
    Ok(args::text(re.replace_all(s, NoExpand(replacement))))
}

/// Pattern: regexSplit - at most `n` parts; zero gives none, negative gives all
pub(crate) fn native_regex_split(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let re = compile(args::string(args, 0)?)?;
    let s = args::string(args, 1)?;
    let n = args::int(args, 2)?;
    let parts: Vec<&str> = match limit(n) {
        Some(0) => Vec::new(),
        Some(n) => re.splitn(s, n).collect(),
        None => re.split(s).collect(),
    };
    Ok(Value::list(parts))
}

/// Backslashes exactly the characters `\.+*?()|[]{}^$`.
fn quote_meta(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(
            c,
            '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Pattern: regexQuoteMeta
pub(crate) fn native_regex_quote_meta(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(args::text(quote_meta(args::string(args, 0)?)))
}
