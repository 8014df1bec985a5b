//! Domain-specific error types and error handling.

mod types;


pub use types::{AuthError, RateLimitError, TokenError};

use ag_shared::types::response::ErrorResponse;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// The expiring store or account store failed
    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    RateLimit(#[from] RateLimitError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// HTTP status the error is surfaced with
    pub fn status_code(&self) -> u16 {
        match self {
            DomainError::Validation { .. } => 400,
            DomainError::NotFound { .. } => 404,
            DomainError::Storage { .. } | DomainError::Internal { .. } => 500,
            DomainError::Auth(_) | DomainError::Token(_) => 403,
            DomainError::RateLimit(_) => 429,
        }
    }

    /// Stable snake_case code for the error body
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "validation_error",
            DomainError::NotFound { .. } => "not_found",
            DomainError::Storage { .. } => "storage_error",
            DomainError::Internal { .. } => "internal_error",
            DomainError::Auth(e) => e.error_code(),
            DomainError::Token(e) => e.error_code(),
            DomainError::RateLimit(_) => "rate_limit_exceeded",
        }
    }

    /// Whether the error came from a missing or rejected credential
    pub fn is_credential_failure(&self) -> bool {
        matches!(self, DomainError::Auth(_) | DomainError::Token(_))
    }

    pub fn storage(message: impl Into<String>) -> Self {
        DomainError::Storage {
            message: message.into(),
        }
    }

    /// Render as the wire error body
    pub fn to_error_response(&self) -> ErrorResponse {
        let status = self.status_code();
        // Internal details stay in the logs
        let message = match self {
            DomainError::Storage { .. } | DomainError::Internal { .. } => {
                String::from("An internal error occurred")
            }
            other => other.to_string(),
        };
        let response = ErrorResponse::new(self.error_code(), message, status);

        match self {
            DomainError::RateLimit(RateLimitError::Exceeded {
                limit,
                reset_seconds,
            }) => response
                .with_data("limit", *limit)
                .with_data("remaining", 0)
                .with_data("reset", *reset_seconds)
                .with_data("status", status),
            _ => response,
        }
    }
}
