//! Error types for Quill functions.
//!
//! Uses `thiserror` for ergonomic error definition.

use std::fmt;

use thiserror::Error;

use crate::types::{Arity, Type};

/// The main error type for Quill operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: Type, actual: Type) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, actual })
    }

    /// Creates an arity mismatch error.
    #[must_use]
    pub fn arity_mismatch(expected: Arity, actual: usize) -> Self {
        Self::new(ErrorKind::ArityMismatch { expected, actual })
    }

    /// Creates a semantic limit exceeded error.
    #[must_use]
    pub fn limit_exceeded(limit: SemanticLimit) -> Self {
        Self::new(ErrorKind::LimitExceeded(limit))
    }

    /// Creates a parse error for malformed durations, dates, patterns, or JSON.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ParseError {
            message: message.into(),
        })
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument(message.into()))
    }

    /// Creates an undefined function error.
    #[must_use]
    pub fn undefined_function(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UndefinedFunction(name.into()))
    }

    /// Wraps this error as an abort of the enclosing evaluation.
    ///
    /// Aborting an already-aborted error keeps the original function name.
    #[must_use]
    pub fn abort(self, function: &str) -> Self {
        if self.is_abort() {
            return self;
        }
        Self::new(ErrorKind::Aborted {
            function: function.to_string(),
            cause: Box::new(self),
        })
    }

    /// Returns true if this error must abort the enclosing evaluation.
    #[must_use]
    pub const fn is_abort(&self) -> bool {
        matches!(self.kind, ErrorKind::Aborted { .. })
    }

    /// Returns the underlying error, looking through an abort wrapper.
    #[must_use]
    pub fn root(&self) -> &Self {
        match &self.kind {
            ErrorKind::Aborted { cause, .. } => cause.root(),
            _ => self,
        }
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Operand lacks the required shape.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected type.
        expected: Type,
        /// The actual type encountered.
        actual: Type,
    },

    /// Wrong number of arguments to function.
    #[error("arity mismatch: expected {expected}, got {actual}")]
    ArityMismatch {
        /// Accepted argument counts.
        expected: Arity,
        /// Actual number of arguments.
        actual: usize,
    },

    /// Malformed duration, date, regular expression, or JSON text.
    #[error("parse error: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// Argument has the right type but an unusable value.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Semantic limit exceeded (resource ceiling hit).
    #[error("limit exceeded: {0}")]
    LimitExceeded(SemanticLimit),

    /// No function is registered under this name.
    #[error("undefined function: {0}")]
    UndefinedFunction(String),

    /// Raised on purpose by a template.
    #[error("{0}")]
    Failed(String),

    /// A convenience-form function failed and the evaluation must stop.
    #[error("error calling {function}: {cause}")]
    Aborted {
        /// Registered name of the failing function.
        function: String,
        /// The error the strict form returned.
        cause: Box<Error>,
    },
}

/// Resource ceilings that can be exceeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticLimit {
    /// Too many loop iterations requested.
    LoopIterations {
        /// The configured limit.
        limit: usize,
        /// The iteration count the call would have needed.
        requested: u64,
    },
    /// Output string would be too long.
    StringLength {
        /// The configured limit.
        limit: usize,
        /// The byte length the call would have produced.
        requested: u64,
    },
    /// Too many chunks requested.
    ChunkCount {
        /// The configured limit.
        limit: usize,
        /// The chunk count the call would have produced.
        requested: u64,
    },
}

impl fmt::Display for SemanticLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoopIterations { limit, requested } => {
                write!(f, "{requested} iterations exceeds maximum of {limit}")
            }
            Self::StringLength { limit, requested } => {
                write!(f, "string length {requested} exceeds maximum of {limit}")
            }
            Self::ChunkCount { limit, requested } => {
                write!(f, "number of chunks {requested} exceeds maximum of {limit}")
            }
        }
    }
}
