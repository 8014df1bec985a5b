//! Mapping of domain errors onto HTTP responses

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};

use ag_core::errors::DomainError;

use crate::dto::ErrorResponseExt;

/// Render a domain error as its JSON error body
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let body = error.to_error_response();

    if body.status >= 500 {
        tracing::error!(code = %body.code, error = %error, "Request failed");
    } else if error.is_credential_failure() {
        tracing::warn!(code = %body.code, "Credentials rejected");
    } else {
        tracing::debug!(code = %body.code, status = body.status, "Request rejected");
    }

    body.to_response()
}

/// Handler error type; lets routes use `?` on domain results
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub DomainError);

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        handle_domain_error(&self.0)
    }
}

impl From<ag_core::AuthError> for ApiError {
    fn from(error: ag_core::AuthError) -> Self {
        ApiError(error.into())
    }
}

impl From<ag_core::TokenError> for ApiError {
    fn from(error: ag_core::TokenError) -> Self {
        ApiError(error.into())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError(DomainError::Validation {
            message: errors.to_string(),
        })
    }
}

/// Malformed JSON bodies answer with the standard error body
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError(DomainError::Validation {
        message: err.to_string(),
    })
    .into()
}

pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    ApiError(DomainError::Validation {
        message: err.to_string(),
    })
    .into()
}
