//! Text transforms, splitting, joining, and quoting.
//!
//! Most functions take the subject string as their last argument so they
//! read naturally in a template pipeline. Character positions in `trunc` and
//! `substr` count Unicode scalar values and are clamped, so they never split
//! a character or run off the end of the text.

use std::fmt::Write as _;
use std::sync::LazyLock;

use quill_foundation::coerce::{to_strings, to_text};
use quill_foundation::{Error, Mapping, Result, Value};
use regex::Regex;

use crate::args;
use crate::context::Context;

// ============================================================================
// Helpers
// ============================================================================

/// Returns the characters of `s` in `start..end`, clamped to its length.
fn char_range(s: &str, start: usize, end: usize) -> &str {
    let byte_at = |n: usize| s.char_indices().nth(n).map_or(s.len(), |(i, _)| i);
    let begin = byte_at(start);
    let finish = byte_at(end).max(begin);
    &s[begin..finish]
}

fn clamp_index(n: i64) -> usize {
    usize::try_from(n.max(0)).unwrap_or(usize::MAX)
}

/// Capitalizes the first letter of each word and lowercases the rest.
///
/// Apostrophes and underscores inside a word do not start a new one.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphanumeric() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
                in_word = true;
            }
        } else {
            in_word = in_word && matches!(c, '\'' | '\u{2019}' | '_');
            out.push(c);
        }
    }
    out
}

/// Letters, marks, numbers, punctuation, symbols, and the ASCII space.
static PRINTABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\p{M}\p{N}\p{P}\p{S} ]$").unwrap());

fn is_printable(c: char) -> bool {
    if c.is_ascii() {
        return c == ' ' || c.is_ascii_graphic();
    }
    PRINTABLE.is_match(c.encode_utf8(&mut [0; 4]))
}

/// Double-quotes `s`, escaping quotes, backslashes, and anything that is not
/// printable.
pub fn go_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0b}' => out.push_str("\\v"),
            c if !is_printable(c) => {
                let code = u32::from(c);
                let _ = match code {
                    0..0x80 => write!(out, "\\x{code:02x}"),
                    0x80..0x1_0000 => write!(out, "\\u{code:04x}"),
                    _ => write!(out, "\\U{code:08x}"),
                };
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Splits `s` around `sep`, returning at most `limit` parts.
///
/// An empty separator splits between characters; the final part holds the
/// unsplit remainder when `limit` is reached.
fn split_parts<'a>(s: &'a str, sep: &str, limit: Option<usize>) -> Vec<&'a str> {
    if sep.is_empty() {
        let mut parts = Vec::new();
        for (i, c) in s.char_indices() {
            if limit.is_some_and(|n| parts.len() + 1 == n) {
                parts.push(&s[i..]);
                return parts;
            }
            parts.push(&s[i..i + c.len_utf8()]);
        }
        return parts;
    }
    match limit {
        Some(n) => s.splitn(n, sep).collect(),
        None => s.split(sep).collect(),
    }
}

/// Builds the `_0`, `_1`, ... keyed mapping `split` and `splitn` return.
fn positional(parts: &[&str]) -> Value {
    let map: Mapping = parts
        .iter()
        .enumerate()
        .map(|(i, part)| (format!("_{i}"), args::text(*part)))
        .collect();
    Value::Map(map)
}

// ============================================================================
// Transforms
// ============================================================================

/// String: trunc - keep a prefix (n >= 0) or a suffix of |n| characters
pub(crate) fn native_trunc(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let n = args::int(args, 0)?;
    let s = args::string(args, 1)?;
    let len = i64::try_from(s.chars().count()).unwrap_or(i64::MAX);
    let out = if n < 0 && len + n > 0 {
        char_range(s, clamp_index(len + n), usize::MAX)
    } else if n >= 0 && len > n {
        char_range(s, 0, clamp_index(n))
    } else {
        s
    };
    Ok(args::text(out))
}

/// String: trim - strip surrounding whitespace
pub(crate) fn native_trim(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(args::text(args::string(args, 0)?.trim()))
}

/// String: upper
pub(crate) fn native_upper(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(args::text(args::string(args, 0)?.to_uppercase()))
}

/// String: lower
pub(crate) fn native_lower(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(args::text(args::string(args, 0)?.to_lowercase()))
}

/// String: title
pub(crate) fn native_title(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(args::text(title_case(args::string(args, 0)?)))
}

/// String: substr - characters in `start..end`
///
/// A negative start means "from the beginning"; a negative or oversized end
/// means "to the end".
pub(crate) fn native_substr(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let start = args::int(args, 0)?;
    let end = args::int(args, 1)?;
    let s = args::string(args, 2)?;
    let len = i64::try_from(s.chars().count()).unwrap_or(i64::MAX);
    let out = if start < 0 {
        char_range(s, 0, clamp_index(end))
    } else if end < 0 || end > len {
        char_range(s, clamp_index(start), usize::MAX)
    } else {
        char_range(s, clamp_index(start), clamp_index(end))
    };
    Ok(args::text(out))
}

/// String: repeat
///
/// The count and the output length are checked against the context ceilings
/// before anything is allocated.
pub(crate) fn native_repeat(ctx: &Context, args: &[Value]) -> Result<Value> {
    let count = args::int(args, 0)?;
    let s = args::string(args, 1)?;
    let Ok(times) = u64::try_from(count) else {
        return Err(Error::invalid_argument(format!(
            "repeat count must not be negative, got {count}"
        )));
    };
    let limits = ctx.limits();
    limits.check_iterations(times)?;
    limits.check_string_length(times.saturating_mul(s.len() as u64))?;
    Ok(args::text(s.repeat(usize::try_from(times).unwrap_or(0))))
}

/// String: trimAll - strip any of the cutset characters from both ends
pub(crate) fn native_trim_all(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let cutset = args::string(args, 0)?;
    let s = args::string(args, 1)?;
    Ok(args::text(s.trim_matches(|c| cutset.contains(c))))
}

/// String: trimPrefix
pub(crate) fn native_trim_prefix(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let prefix = args::string(args, 0)?;
    let s = args::string(args, 1)?;
    Ok(args::text(s.strip_prefix(prefix).unwrap_or(s)))
}

/// String: trimSuffix
pub(crate) fn native_trim_suffix(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let suffix = args::string(args, 0)?;
    let s = args::string(args, 1)?;
    Ok(args::text(s.strip_suffix(suffix).unwrap_or(s)))
}

/// String: contains
pub(crate) fn native_contains(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let needle = args::string(args, 0)?;
    Ok(Value::Bool(args::string(args, 1)?.contains(needle)))
}

/// String: hasPrefix
pub(crate) fn native_has_prefix(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let prefix = args::string(args, 0)?;
    Ok(Value::Bool(args::string(args, 1)?.starts_with(prefix)))
}

/// String: hasSuffix
pub(crate) fn native_has_suffix(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let suffix = args::string(args, 0)?;
    Ok(Value::Bool(args::string(args, 1)?.ends_with(suffix)))
}

/// String: indent - prefix every line with `n` spaces
pub(crate) fn native_indent(ctx: &Context, args: &[Value]) -> Result<Value> {
    let n = args::int(args, 0)?;
    let s = args::string(args, 1)?;
    Ok(args::text(indent(ctx, n, s)?))
}

/// String: nindent - newline, then `indent`
pub(crate) fn native_nindent(ctx: &Context, args: &[Value]) -> Result<Value> {
    let n = args::int(args, 0)?;
    let s = args::string(args, 1)?;
    Ok(args::text(format!("\n{}", indent(ctx, n, s)?)))
}

/// Prefixes every line of `s` with `n` spaces.
///
/// Any padding at all counts the whole result against the string ceiling.
fn indent(ctx: &Context, n: i64, s: &str) -> Result<String> {
    let Ok(width) = u64::try_from(n) else {
        return Err(Error::invalid_argument(format!(
            "indent width must not be negative, got {n}"
        )));
    };
    if width > 0 {
        let lines = s.bytes().filter(|&b| b == b'\n').count() as u64 + 1;
        let total = width.saturating_mul(lines).saturating_add(s.len() as u64);
        ctx.limits().check_string_length(total)?;
    }
    let width = usize::try_from(width).unwrap_or(usize::MAX);
    let pad = " ".repeat(width);
    Ok(format!("{pad}{}", s.replace('\n', &format!("\n{pad}"))))
}

/// String: replace - replace every occurrence of `old` with `new`
pub(crate) fn native_replace(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let old = args::string(args, 0)?;
    let new = args::string(args, 1)?;
    let s = args::string(args, 2)?;
    Ok(args::text(s.replace(old, new)))
}

/// String: plural - `one` when the count is exactly 1, else `many`
pub(crate) fn native_plural(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let one = args::string(args, 0)?;
    let many = args::string(args, 1)?;
    let count = args::int(args, 2)?;
    Ok(args::text(if count == 1 { one } else { many }))
}

// ============================================================================
// Joining and quoting
// ============================================================================

/// String: quote - Go-style double quoting, nil arguments skipped
pub(crate) fn native_quote(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let quoted: Vec<String> = args
        .iter()
        .filter(|v| !v.is_nil())
        .map(|v| go_quote(&to_text(v)))
        .collect();
    Ok(args::text(quoted.join(" ")))
}

/// String: squote - single quoting without escapes, nil arguments skipped
pub(crate) fn native_squote(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let quoted: Vec<String> = args
        .iter()
        .filter(|v| !v.is_nil())
        .map(|v| format!("'{v}'"))
        .collect();
    Ok(args::text(quoted.join(" ")))
}

/// String: cat - space-joined text of the non-nil arguments
pub(crate) fn native_cat(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let parts: Vec<String> = args
        .iter()
        .filter(|v| !v.is_nil())
        .map(|v| v.to_string())
        .collect();
    Ok(args::text(parts.join(" ")))
}

/// String: toString
pub(crate) fn native_to_string(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(args::text(to_text(args::nth(args, 0)?)))
}

/// String: join
pub(crate) fn native_join(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let sep = args::string(args, 0)?;
    Ok(args::text(to_strings(args::nth(args, 1)?).join(sep)))
}

/// String: toStrings
pub(crate) fn native_to_strings(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(Value::list(to_strings(args::nth(args, 0)?)))
}

// ============================================================================
// Splitting
// ============================================================================

/// String: split - mapping keyed `_0`, `_1`, ...
pub(crate) fn native_split(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let sep = args::string(args, 0)?;
    let s = args::string(args, 1)?;
    Ok(positional(&split_parts(s, sep, None)))
}

/// String: splitList
pub(crate) fn native_split_list(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let sep = args::string(args, 0)?;
    let s = args::string(args, 1)?;
    Ok(Value::list(split_parts(s, sep, None)))
}

/// String: splitn - at most `n` parts; zero gives none, negative gives all
pub(crate) fn native_splitn(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let sep = args::string(args, 0)?;
    let n = args::int(args, 1)?;
    let s = args::string(args, 2)?;
    let parts = match usize::try_from(n) {
        Ok(0) => Vec::new(),
        Ok(limit) => split_parts(s, sep, Some(limit)),
        Err(_) => split_parts(s, sep, None),
    };
    Ok(positional(&parts))
}
