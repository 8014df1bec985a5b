//! Error types for token handling, credential checks and admission control
//!
//! Each variant carries a stable machine code (see `error_code`) so the API
//! layer can render it without matching on display strings.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Every registered authenticator and the password fallback failed
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Caller lacks the permission for the operation, or the target account does not exist
    #[error("Forbidden")]
    Forbidden,
}

impl AuthError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::Forbidden => "forbidden",
        }
    }
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token signing secret is not configured")]
    SecretMissing,

    #[error("Authorization header not found")]
    NoAuthHeader,

    #[error("Authentication token is malformed")]
    MalformedToken,

    /// Signature or structure invalid; decode details are never exposed
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token issuer is invalid")]
    InvalidIssuer,

    #[error("Token client is invalid")]
    InvalidClient,

    #[error("Token has expired")]
    TokenExpired,
}

impl TokenError {
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::SecretMissing => "auth_secret_missing",
            TokenError::NoAuthHeader => "auth_no_header",
            TokenError::MalformedToken => "auth_malformed_token",
            TokenError::InvalidToken => "auth_invalid_token",
            TokenError::InvalidIssuer => "auth_invalid_issuer",
            TokenError::InvalidClient => "auth_invalid_client",
            TokenError::TokenExpired => "auth_token_expired",
        }
    }
}

/// Admission-control errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RateLimitError {
    #[error("Rate limit exceeded, retry in {reset_seconds} seconds")]
    Exceeded { limit: u32, reset_seconds: u64 },
}
