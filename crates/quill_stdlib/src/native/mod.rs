//! Native function implementations.
//!
//! Functions are organized by category:
//! - `collection`: Sequence construction and manipulation
//! - `dict`: String-keyed mapping operations
//! - `string`: Text transforms, splitting, and quoting
//! - `encoding`: Base64/base32 codecs and digests
//! - `pattern`: Regular expressions
//! - `math`: Integer and float arithmetic, ranges, and sequences
//! - `defaults`: Emptiness-driven defaults and flow control
//! - `json`: JSON encoding and decoding
//! - `reflect`: Runtime type and kind inspection
//! - `date`, `layout`, `duration`: Time formatting, parsing, and durations
//! - `path`: Lexical path manipulation
//!
//! Every function has the signature [`NativeFnPtr`](crate::NativeFnPtr).

#[allow(clippy::unnecessary_wraps)]
pub(crate) mod collection;
#[allow(clippy::unnecessary_wraps)]
pub(crate) mod date;
#[allow(clippy::unnecessary_wraps)]
pub(crate) mod defaults;
#[allow(clippy::unnecessary_wraps)]
pub(crate) mod dict;
pub mod duration;
#[allow(clippy::unnecessary_wraps)]
pub(crate) mod encoding;
#[allow(clippy::unnecessary_wraps)]
pub(crate) mod json;
pub mod layout;
#[allow(clippy::unnecessary_wraps)]
pub(crate) mod math;
#[allow(clippy::unnecessary_wraps)]
pub(crate) mod path;
#[allow(clippy::unnecessary_wraps)]
pub(crate) mod pattern;
#[allow(clippy::unnecessary_wraps)]
pub(crate) mod reflect;
#[allow(clippy::unnecessary_wraps)]
#[allow(clippy::redundant_closure_for_method_calls)]
pub(crate) mod string;
