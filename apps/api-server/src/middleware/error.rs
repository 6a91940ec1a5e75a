//! Error handling - maps failures onto status codes and RFC 7807 bodies.
//!
//! Client-facing messages are fixed per kind. Details stay in the logs.

use std::fmt;
use std::time::Duration;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use medtrans_core::{SessionStoreError, TranslateError};
use medtrans_shared::ErrorResponse;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    RateLimited { reset_after: Duration },
    ServiceTimeout,
    ServiceUnavailable,
    Upstream(u16),
    EmptyResult,
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::RateLimited { reset_after } => {
                write!(f, "Rate limited for {}s", reset_after.as_secs())
            }
            AppError::ServiceTimeout => write!(f, "Translation service timed out"),
            AppError::ServiceUnavailable => write!(f, "Translation service unavailable"),
            AppError::Upstream(status) => write!(f, "Translation service returned {}", status),
            AppError::EmptyResult => write!(f, "Empty translation result"),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::ServiceTimeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Upstream(_) | AppError::EmptyResult | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::BadRequest(msg) => ErrorResponse::bad_request(msg.clone()),
            AppError::NotFound(msg) => ErrorResponse::not_found(msg.clone()),
            AppError::RateLimited { reset_after } => ErrorResponse::too_many_requests()
                .with_detail(format!(
                    "Try again in {} seconds.",
                    reset_after.as_secs().max(1)
                )),
            AppError::ServiceTimeout => ErrorResponse::gateway_timeout(),
            AppError::ServiceUnavailable => ErrorResponse::service_unavailable(),
            AppError::Upstream(_) => ErrorResponse::internal_error("Translation service error"),
            AppError::EmptyResult => ErrorResponse::internal_error("Empty translation result"),
            AppError::Internal(detail) => {
                // Log internal errors
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error("An error occurred during translation")
            }
        };

        let mut builder = HttpResponse::build(self.status_code());
        if let AppError::RateLimited { reset_after } = self {
            builder
                .insert_header(("X-RateLimit-Remaining", "0"))
                .insert_header(("Retry-After", reset_after.as_secs().max(1).to_string()));
        }
        builder.json(error)
    }
}

// Conversion from domain errors
impl From<TranslateError> for AppError {
    fn from(err: TranslateError) -> Self {
        match err {
            TranslateError::BadRequest(msg) => AppError::BadRequest(msg),
            TranslateError::UnsupportedLanguage(lang) => {
                AppError::BadRequest(format!("Unsupported target language: {}", lang))
            }
            TranslateError::RateLimitExceeded { reset_after } => {
                AppError::RateLimited { reset_after }
            }
            TranslateError::ServiceTimeout => AppError::ServiceTimeout,
            TranslateError::ServiceUnavailable => AppError::ServiceUnavailable,
            // The body was logged at the provider boundary.
            TranslateError::UpstreamError { status, .. } => AppError::Upstream(status),
            TranslateError::EmptyResult => AppError::EmptyResult,
            TranslateError::Internal(detail) => AppError::Internal(detail),
        }
    }
}

impl From<SessionStoreError> for AppError {
    fn from(err: SessionStoreError) -> Self {
        tracing::error!("Session store error: {}", err);
        AppError::Internal("Session store error".to_string())
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
