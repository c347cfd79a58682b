//! JSON encoding and decoding.
//!
//! Values convert to and from [`serde_json::Value`]. Object keys come out
//! sorted. Unless raw output is requested, `<`, `>`, and `&` are written as
//! unicode escapes so the text can be embedded in HTML.

use std::io;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::SecondsFormat;
use quill_foundation::coerce::format_float;
use quill_foundation::{Error, Mapping, Result, Value};
use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter, Serializer};
use serde_json::{Map, Number};

use crate::args;
use crate::context::Context;

/// Output style for [`encode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    /// Compact, HTML-safe.
    Compact,
    /// Two-space indented, HTML-safe.
    Pretty,
    /// Compact, HTML characters left alone.
    Raw,
}

// ============================================================================
// Encoding
// ============================================================================

/// Encodes a value as JSON text.
///
/// # Errors
///
/// Returns [`ErrorKind::InvalidArgument`] for NaN or infinite floats and for
/// mappings that contain themselves.
///
/// [`ErrorKind::InvalidArgument`]: quill_foundation::ErrorKind::InvalidArgument
pub fn encode(value: &Value, style: Style) -> Result<String> {
    let tree = to_json(value, &mut Vec::new())?;
    let mut out: Vec<u8> = Vec::new();
    let written = match style {
        Style::Pretty => {
            let fmt = PlainFloats(PrettyFormatter::with_indent(b"  "));
            tree.serialize(&mut Serializer::with_formatter(&mut out, fmt))
        }
        Style::Compact | Style::Raw => {
            let fmt = PlainFloats(CompactFormatter);
            tree.serialize(&mut Serializer::with_formatter(&mut out, fmt))
        }
    };
    written.map_err(|e| Error::invalid_argument(format!("json: {e}")))?;
    let text = String::from_utf8_lossy(&out);
    Ok(escape(&text, style != Style::Raw))
}

/// Spells a finite float as plain decimal when its magnitude is in
/// `[1e-6, 1e21)` and in exponent form (`1e+21`, `1e-7`) otherwise.
fn float_text(f: f64) -> String {
    let abs = f.abs();
    if abs == 0.0 || (1e-6..1e21).contains(&abs) {
        return format!("{f}");
    }
    let text = format!("{f:e}");
    match text.split_once('e') {
        Some((mantissa, exp)) if exp.starts_with('-') => format!("{mantissa}e{exp}"),
        Some((mantissa, exp)) => format!("{mantissa}e+{exp:0>2}"),
        None => text,
    }
}

/// Formatter that writes floats with [`float_text`] and defers everything
/// else to the wrapped formatter.
struct PlainFloats<F>(F);

impl<F: Formatter> Formatter for PlainFloats<F> {
    fn write_f64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f64) -> io::Result<()> {
        writer.write_all(float_text(value).as_bytes())
    }

    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_object_key(writer, first)
    }

    fn end_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_key(writer)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_value(writer)
    }
}

fn escape(text: &str, html: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' if html => out.push_str("\\u003c"),
            '>' if html => out.push_str("\\u003e"),
            '&' if html => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out
}

fn float_to_json(f: f64) -> Result<serde_json::Value> {
    Number::from_f64(f)
        .map(serde_json::Value::Number)
        .ok_or_else(|| Error::invalid_argument(format!("json: unsupported value: {}", format_float(f))))
}

fn to_json(value: &Value, open: &mut Vec<Mapping>) -> Result<serde_json::Value> {
    use serde_json::Value as Json;

    Ok(match value {
        Value::Nil => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Int(n) => Json::Number(Number::from(*n)),
        Value::Uint(n) => Json::Number(Number::from(*n)),
        Value::Float(f) => float_to_json(*f)?,
        Value::String(s) => Json::String(s.to_string()),
        Value::Bytes(b) => Json::String(STANDARD.encode(b)),
        Value::Vec(items) => Json::Array(
            items
                .iter()
                .map(|item| to_json(item, open))
                .collect::<Result<_>>()?,
        ),
        Value::Map(map) => {
            if open.iter().any(|m| Mapping::ptr_eq(m, map)) {
                return Err(Error::invalid_argument(
                    "json: unsupported value: encountered a cycle",
                ));
            }
            open.push(map.clone());
            let mut object = Map::new();
            for (key, item) in map.sorted_entries() {
                object.insert(key.to_string(), to_json(&item, open)?);
            }
            open.pop();
            Json::Object(object)
        }
        Value::Time(t) => Json::String(t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        Value::Opaque(o) => match o.object().text() {
            Some(text) => Json::String(text),
            None => Json::Object(Map::new()),
        },
    })
}

// ============================================================================
// Decoding
// ============================================================================

/// Decodes JSON text into a value.
///
/// # Errors
///
/// Returns [`ErrorKind::ParseError`] if the text is not valid JSON.
///
/// [`ErrorKind::ParseError`]: quill_foundation::ErrorKind::ParseError
pub fn decode(text: &str) -> Result<Value> {
    let tree: serde_json::Value =
        serde_json::from_str(text).map_err(|e| Error::parse(format!("json: {e}")))?;
    Ok(from_json(tree))
}

fn from_json(tree: serde_json::Value) -> Value {
    use serde_json::Value as Json;

    match tree {
        Json::Null => Value::Nil,
        Json::Bool(b) => Value::Bool(b),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(u) = n.as_u64() {
                Value::Uint(u)
            } else {
                Value::Float(n.as_f64().unwrap_or(0.0))
            }
        }
        Json::String(s) => Value::from(s),
        Json::Array(items) => Value::list(items.into_iter().map(from_json)),
        Json::Object(object) => Value::Map(
            object
                .into_iter()
                .map(|(key, item)| (key, from_json(item)))
                .collect(),
        ),
    }
}

// ============================================================================
// Native functions
// ============================================================================

/// JSON: fromJSON - nil when the text does not parse
pub(crate) fn native_from_json(ctx: &Context, args: &[Value]) -> Result<Value> {
    args::string(args, 0)?;
    Ok(native_must_from_json(ctx, args).unwrap_or(Value::Nil))
}

/// JSON: mustFromJSON
pub(crate) fn native_must_from_json(_ctx: &Context, args: &[Value]) -> Result<Value> {
    decode(args::string(args, 0)?)
}

/// JSON: toJSON - `""` when the value cannot be encoded
pub(crate) fn native_to_json(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let value = args::nth(args, 0)?;
    Ok(args::text(encode(value, Style::Compact).unwrap_or_default()))
}

/// JSON: mustToJSON
pub(crate) fn native_must_to_json(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(args::text(encode(args::nth(args, 0)?, Style::Compact)?))
}

/// JSON: toPrettyJSON - `""` when the value cannot be encoded
pub(crate) fn native_to_pretty_json(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let value = args::nth(args, 0)?;
    Ok(args::text(encode(value, Style::Pretty).unwrap_or_default()))
}

/// JSON: mustToPrettyJSON
pub(crate) fn native_must_to_pretty_json(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(args::text(encode(args::nth(args, 0)?, Style::Pretty)?))
}

/// JSON: toRawJSON
pub(crate) fn native_to_raw_json(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(args::text(encode(args::nth(args, 0)?, Style::Raw)?))
}
