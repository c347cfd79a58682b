//! Function registry and native template functions for Quill.
//!
//! This crate provides:
//! - [`Registry`] - The name → function table, with strict and convenience forms
//! - [`Context`] - Per-evaluation ceilings, zone, clock, and random source
//! - Native functions organized by category (lists, mappings, strings,
//!   numbers, dates, encodings, patterns, JSON, reflection, paths)
//!
//! # Example
//!
//! ```
//! use quill_foundation::Value;
//! use quill_stdlib::{Context, Registry};
//!
//! let registry = Registry::standard();
//! let ctx = Context::new();
//! let out = registry.call(&ctx, "upper", &[Value::from("hello")]).unwrap();
//! assert_eq!(out, Value::from("HELLO"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod args;
pub mod context;
pub mod native;
pub mod registry;

pub use context::{Clock, Context};
pub use native::{duration, layout};
pub use registry::{Form, NativeFn, NativeFnPtr, Registry};
