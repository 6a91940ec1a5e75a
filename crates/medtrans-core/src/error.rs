//! Domain-level error types.

use std::time::Duration;

use thiserror::Error;

/// Failures of the translate flow, classified so the HTTP layer can map each
/// kind to a stable status code and a non-revealing message.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unsupported target language: {0}")]
    UnsupportedLanguage(String),

    #[error("Rate limit exceeded, window resets in {}s", .reset_after.as_secs())]
    RateLimitExceeded { reset_after: Duration },

    #[error("Translation service timed out")]
    ServiceTimeout,

    #[error("Translation service unavailable")]
    ServiceUnavailable,

    #[error("Upstream returned {status}")]
    UpstreamError { status: u16, body: String },

    #[error("Empty translation result")]
    EmptyResult,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TranslateError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }
}

/// Session store errors.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}

impl From<SessionStoreError> for TranslateError {
    fn from(err: SessionStoreError) -> Self {
        TranslateError::Internal(format!("session store: {}", err))
    }
}

impl From<serde_json::Error> for SessionStoreError {
    fn from(err: serde_json::Error) -> Self {
        SessionStoreError::Serialization(err.to_string())
    }
}
