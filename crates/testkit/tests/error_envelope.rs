//! Integration tests for shared error propagation.

use logbridge_shared::{
    ErrorClass, ErrorCode, ErrorEnvelope, ErrorKind, UnexpectedError, normalize_unexpected_error,
};
use logbridge_testkit::errors::{emit_error, invalid_input_error, resolution_error};

#[test]
fn error_envelope_crosses_crates() {
    let resolution = resolution_error();
    assert_eq!(resolution.code, ErrorCode::resolution_failed());
    assert_eq!(resolution.class, ErrorClass::NonRetriable);

    let boxed: Box<dyn std::error::Error> = Box::new(resolution);
    let description = boxed.to_string();
    assert!(description.contains("binding:resolution_failed"), "{description}");
}

#[test]
fn emit_error_names_the_logger() {
    let error = emit_error("svc.db");
    assert!(error.class.is_retriable());
    assert_eq!(error.metadata.get("logger").map(String::as_str), Some("svc.db"));
}

#[test]
fn normalize_unexpected_error_is_available() {
    let envelope = normalize_unexpected_error(UnexpectedError::message("boom"));
    assert_eq!(envelope.code, ErrorCode::internal());
    assert_eq!(envelope.kind, ErrorKind::Unexpected);

    let io_error = std::io::Error::new(std::io::ErrorKind::TimedOut, "timeout");
    let envelope = normalize_unexpected_error(UnexpectedError::error(io_error));
    assert_eq!(envelope.code, ErrorCode::timeout());
}

#[test]
fn error_envelope_constructors_work() {
    let expected = invalid_input_error();
    assert_eq!(expected.kind, ErrorKind::Expected);

    let invariant = ErrorEnvelope::invariant(ErrorCode::already_initialized(), "twice");
    assert_eq!(invariant.kind, ErrorKind::Invariant);
}
