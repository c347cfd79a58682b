//! Quill - Runtime-typed data-manipulation functions for text templates
//!
//! This crate re-exports all layers of the Quill system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: quill_stdlib     — Registry, context, native functions
//! Layer 0: quill_foundation — Core types (Value, Mapping, Error, Limits)
//! ```

pub use quill_foundation as foundation;
pub use quill_stdlib as stdlib;
