//! Base64/base32 codecs and digests.
//!
//! Decoders never fail: malformed input yields the decoder's error message
//! as the result text.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use quill_foundation::{Error, Result, Type, Value};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

use crate::args;
use crate::context::Context;

const BASE32: base32::Alphabet = base32::Alphabet::RFC4648 { padding: true };

/// Returns the raw bytes of a string or bytes argument.
fn input(args: &[Value], index: usize) -> Result<&[u8]> {
    match args::nth(args, index)? {
        Value::String(s) => Ok(s.as_bytes()),
        Value::Bytes(b) => Ok(b),
        other => Err(Error::type_mismatch(Type::String, other.value_type())),
    }
}

/// Encoding: b64enc
pub(crate) fn native_b64enc(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(args::text(STANDARD.encode(input(args, 0)?)))
}

/// Encoding: b64dec
pub(crate) fn native_b64dec(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let decoded = match STANDARD.decode(input(args, 0)?) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => e.to_string(),
    };
    Ok(args::text(decoded))
}

/// Encoding: b32enc
pub(crate) fn native_b32enc(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(args::text(base32::encode(BASE32, input(args, 0)?)))
}

/// Encoding: b32dec
pub(crate) fn native_b32dec(_ctx: &Context, args: &[Value]) -> Result<Value> {
    let raw = input(args, 0)?;
    let decoded = match base32::decode(BASE32, &String::from_utf8_lossy(raw)) {
        Some(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        None => "illegal base32 data".to_string(),
    };
    Ok(args::text(decoded))
}

/// Digest: sha1sum (lowercase hex)
pub(crate) fn native_sha1sum(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(args::text(format!("{:x}", Sha1::digest(input(args, 0)?))))
}

/// Digest: sha256sum (lowercase hex)
pub(crate) fn native_sha256sum(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(args::text(format!("{:x}", Sha256::digest(input(args, 0)?))))
}

/// Digest: sha512sum (lowercase hex)
pub(crate) fn native_sha512sum(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(args::text(format!("{:x}", Sha512::digest(input(args, 0)?))))
}

/// Digest: adler32sum (decimal)
pub(crate) fn native_adler32sum(_ctx: &Context, args: &[Value]) -> Result<Value> {
    Ok(args::text(adler::adler32_slice(input(args, 0)?).to_string()))
}
