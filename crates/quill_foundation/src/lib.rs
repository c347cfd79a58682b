//! Core values, collections, and coercions for Quill.
//!
//! This crate provides:
//! - [`Value`] - The runtime-typed value every template function operates on
//! - [`Mapping`] - Shared, in-place mutable string-keyed maps
//! - [`Type`] - Type descriptors for argument checking
//! - [`Error`] - Error kinds, with abort wrapping for convenience forms
//! - [`Limits`] - Resource ceilings for bounded operations
//! - [`coerce`] - Total conversions to numbers, text, and truthiness
//! - Persistent collections ([`LtVec`], [`LtMap`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod coerce;
pub mod collections;
pub mod error;
pub mod limits;
pub mod types;
pub mod value;

pub use collections::{LtMap, LtVec};
pub use error::{Error, ErrorKind, SemanticLimit};
pub use limits::Limits;
pub use types::{Arity, Type};
pub use value::{Entries, HostObject, Mapping, Opaque, Value};

/// Result type alias using Quill's error type.
pub type Result<T> = std::result::Result<T, Error>;
