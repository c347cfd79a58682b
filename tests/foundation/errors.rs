//! Integration tests for Error and Limits
//!
//! Tests error construction, abort wrapping, messages, and ceiling checks.

use quill_foundation::{Arity, Error, ErrorKind, Limits, SemanticLimit, Type};

// =============================================================================
// Errors
// =============================================================================

#[test]
fn constructors_set_the_kind() {
    let err = Error::type_mismatch(Type::Vec, Type::String);
    assert!(matches!(
        err.kind,
        ErrorKind::TypeMismatch { expected: Type::Vec, actual: Type::String }
    ));

    let err = Error::arity_mismatch(Arity::Exact(2), 1);
    assert!(matches!(err.kind, ErrorKind::ArityMismatch { actual: 1, .. }));

    assert!(matches!(Error::parse("bad").kind, ErrorKind::ParseError { .. }));
    assert!(matches!(
        Error::undefined_function("nope").kind,
        ErrorKind::UndefinedFunction(ref name) if name == "nope"
    ));
}

#[test]
fn messages() {
    assert_eq!(Error::parse("bad layout").to_string(), "parse error: bad layout");
    assert_eq!(Error::new(ErrorKind::DivisionByZero).to_string(), "division by zero");
    assert_eq!(Error::new(ErrorKind::Failed("stop".into())).to_string(), "stop");
}

#[test]
fn abort_wraps_once() {
    let err = Error::invalid_argument("negative count").abort("repeat");
    assert!(err.is_abort());
    assert_eq!(
        err.to_string(),
        "error calling repeat: invalid argument: negative count"
    );

    let again = err.abort("outer");
    match &again.kind {
        ErrorKind::Aborted { function, .. } => assert_eq!(function, "repeat"),
        other => panic!("expected abort, got {other:?}"),
    }
    assert!(matches!(again.root().kind, ErrorKind::InvalidArgument(_)));
}

#[test]
fn root_of_plain_error_is_itself() {
    let err = Error::new(ErrorKind::DivisionByZero);
    assert!(!err.is_abort());
    assert!(matches!(err.root().kind, ErrorKind::DivisionByZero));
}

// =============================================================================
// Limits
// =============================================================================

#[test]
fn default_ceilings() {
    let limits = Limits::default();
    assert_eq!(limits.max_loop_iterations, 10_000);
    assert_eq!(limits.max_string_length, 100_000);
    assert_eq!(limits.max_chunks, 10_000);
    assert_eq!(Limits::new(), limits);
}

#[test]
fn iteration_ceiling_is_inclusive() {
    let limits = Limits::new().with_max_loop_iterations(5);
    assert!(limits.check_iterations(5).is_ok());
    let err = limits.check_iterations(6).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::LimitExceeded(SemanticLimit::LoopIterations { limit: 5, requested: 6 })
    ));
}

#[test]
fn string_ceiling_is_exclusive() {
    let limits = Limits::new().with_max_string_length(10);
    assert!(limits.check_string_length(9).is_ok());
    assert!(limits.check_string_length(10).is_err());
}

#[test]
fn chunk_ceiling_is_inclusive() {
    let limits = Limits::new().with_max_chunks(2);
    assert!(limits.check_chunks(2).is_ok());
    let err = limits.check_chunks(3).unwrap_err();
    assert_eq!(
        err.to_string(),
        "limit exceeded: number of chunks 3 exceeds maximum of 2"
    );
}

#[test]
fn presets() {
    assert!(Limits::strict().check_iterations(1_001).is_err());
    assert!(Limits::unbounded().check_iterations(u64::MAX).is_ok());
    assert!(Limits::unbounded().check_string_length(u64::MAX - 1).is_ok());
}
