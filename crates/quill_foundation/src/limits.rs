//! Resource ceilings for bounded template functions.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, SemanticLimit};
use crate::Result;

/// Default loop-iteration ceiling.
pub const DEFAULT_MAX_LOOP_ITERATIONS: usize = 10_000;
/// Default output string length ceiling, in bytes.
pub const DEFAULT_MAX_STRING_LENGTH: usize = 100_000;
/// Default chunk-count ceiling.
pub const DEFAULT_MAX_CHUNKS: usize = 10_000;

/// Ceilings that stop a template author from triggering unbounded work.
///
/// Every bounded function computes its prospective cost and checks it here
/// before doing any work, so an overflow never leaves a partial result.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Limits {
    /// Bounds `until`, `untilStep`, `seq`, and the `repeat` count.
    pub max_loop_iterations: usize,
    /// Bounds the byte length of `repeat` output.
    pub max_string_length: usize,
    /// Bounds the number of sub-sequences `chunk` may produce.
    pub max_chunks: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_loop_iterations: DEFAULT_MAX_LOOP_ITERATIONS,
            max_string_length: DEFAULT_MAX_STRING_LENGTH,
            max_chunks: DEFAULT_MAX_CHUNKS,
        }
    }
}

impl Limits {
    /// Creates the default ceilings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tight ceilings for untrusted templates.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            max_loop_iterations: 1_000,
            max_string_length: 10_000,
            max_chunks: 1_000,
        }
    }

    /// Effectively no ceilings.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            max_loop_iterations: usize::MAX,
            max_string_length: usize::MAX,
            max_chunks: usize::MAX,
        }
    }

    /// Builder method to set the loop-iteration ceiling.
    #[must_use]
    pub fn with_max_loop_iterations(mut self, limit: usize) -> Self {
        self.max_loop_iterations = limit;
        self
    }

    /// Builder method to set the string-length ceiling.
    #[must_use]
    pub fn with_max_string_length(mut self, limit: usize) -> Self {
        self.max_string_length = limit;
        self
    }

    /// Builder method to set the chunk-count ceiling.
    #[must_use]
    pub fn with_max_chunks(mut self, limit: usize) -> Self {
        self.max_chunks = limit;
        self
    }

    /// Fails if `requested` iterations would exceed the loop ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`SemanticLimit::LoopIterations`] when over the ceiling.
    pub fn check_iterations(&self, requested: u64) -> Result<()> {
        if requested > self.max_loop_iterations as u64 {
            return Err(Error::limit_exceeded(SemanticLimit::LoopIterations {
                limit: self.max_loop_iterations,
                requested,
            }));
        }
        Ok(())
    }

    /// Fails if an output of `requested` bytes reaches the string ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`SemanticLimit::StringLength`] when at or over the ceiling.
    pub fn check_string_length(&self, requested: u64) -> Result<()> {
        if requested >= self.max_string_length as u64 {
            return Err(Error::limit_exceeded(SemanticLimit::StringLength {
                limit: self.max_string_length,
                requested,
            }));
        }
        Ok(())
    }

    /// Fails if `requested` chunks would exceed the chunk ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`SemanticLimit::ChunkCount`] when over the ceiling.
    pub fn check_chunks(&self, requested: u64) -> Result<()> {
        if requested > self.max_chunks as u64 {
            return Err(Error::limit_exceeded(SemanticLimit::ChunkCount {
                limit: self.max_chunks,
                requested,
            }));
        }
        Ok(())
    }
}
