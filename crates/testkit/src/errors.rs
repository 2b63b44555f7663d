//! Test fixtures for shared error codes and envelopes.

use logbridge_shared::{ErrorClass, ErrorCode, ErrorEnvelope};

/// Return the error codes the dispatch layer can surface.
pub fn common_error_codes() -> Vec<ErrorCode> {
    vec![
        ErrorCode::resolution_failed(),
        ErrorCode::backend_unavailable(),
        ErrorCode::emit_failed(),
        ErrorCode::already_initialized(),
        ErrorCode::invalid_input(),
        ErrorCode::internal(),
    ]
}

/// A backend resolution failure fixture.
pub fn resolution_error() -> ErrorEnvelope {
    ErrorEnvelope::unexpected(
        ErrorCode::resolution_failed(),
        "backend engine not present",
        ErrorClass::NonRetriable,
    )
}

/// An emission failure fixture for the named logger.
pub fn emit_error(logger: &str) -> ErrorEnvelope {
    ErrorEnvelope::unexpected(
        ErrorCode::emit_failed(),
        "sink rejected the entry",
        ErrorClass::Retriable,
    )
    .with_metadata("logger", logger)
}

/// An invalid input error fixture.
pub fn invalid_input_error() -> ErrorEnvelope {
    ErrorEnvelope::expected(ErrorCode::invalid_input(), "invalid input")
}
