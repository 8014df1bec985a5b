//! Identity attached to a request by the request gate.
//!
//! Handlers that need a caller take `AuthContext`; handlers that tolerate
//! anonymous callers take `Option<AuthContext>`.

use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};

use ag_core::{Identity, TokenError};

use crate::handlers::ApiError;

/// Authentication context injected into requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub identity: Identity,
}

impl AuthContext {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }

    /// Id of the calling account; `None` for service clients
    pub fn account_id(&self) -> Option<i64> {
        self.identity.is_account().then_some(self.identity.id)
    }
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .copied()
            .ok_or_else(|| ApiError::from(TokenError::NoAuthHeader));

        ready(result)
    }
}
