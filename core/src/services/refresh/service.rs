//! Refresh token issuance, reuse and exchange

use std::sync::Arc;

use chrono::Utc;
use constant_time_eq::constant_time_eq;
use tracing::{debug, info};

use crate::domain::entities::Identity;
use crate::errors::DomainResult;
use crate::repositories::ExpiringStore;
use crate::services::token::TokenService;

pub const REFRESH_TOKEN_KEY_PREFIX: &str = "refresh_token:";

pub struct RefreshTokenService<S: ExpiringStore> {
    store: Arc<S>,
    tokens: Arc<TokenService>,
}

impl<S: ExpiringStore> RefreshTokenService<S> {
    pub fn new(store: Arc<S>, tokens: Arc<TokenService>) -> Self {
        Self { store, tokens }
    }

    fn storage_key(account_id: i64) -> String {
        format!("{}{}", REFRESH_TOKEN_KEY_PREFIX, account_id)
    }

    /// Refresh token to hand out alongside a new access token
    ///
    /// For accounts the stored token is reused while unexpired; an absent or
    /// expired one is replaced. A stored token that no longer decodes (for
    /// instance after a secret change) is an error, not a silent rotation.
    pub async fn append_refresh(&self, identity: &Identity) -> DomainResult<String> {
        if !identity.is_account() {
            return self.tokens.issue_refresh(identity);
        }

        let key = Self::storage_key(identity.id);
        if let Some(stored) = self.store.get(&key).await? {
            let claims = self.tokens.decode_verified(&stored)?;
            if !claims.is_expired_at(Utc::now().timestamp()) {
                debug!(client = %identity, "Reusing stored refresh token");
                return Ok(stored);
            }
        }

        let token = self.tokens.issue_refresh(identity)?;
        let ttl = self.tokens.config().refresh_token_ttl.max(1) as u64;
        self.store.set_with_expiry(&key, &token, ttl).await?;
        info!(client = %identity, "Refresh token rotated");

        Ok(token)
    }

    /// Resolves a presented refresh token to its account
    ///
    /// The token must validate, carry `token_type = refresh`, name an account,
    /// and equal the stored token exactly.
    pub async fn authenticate_with_refresh(
        &self,
        authorization: Option<&str>,
    ) -> DomainResult<Option<Identity>> {
        let Ok(token) = TokenService::extract_bearer(authorization) else {
            return Ok(None);
        };
        let claims = match self.tokens.validate(token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, "Refresh token rejected");
                return Ok(None);
            }
        };

        let Some(identity) = claims.identity() else {
            return Ok(None);
        };
        if !claims.is_refresh() || !identity.is_account() {
            return Ok(None);
        }

        let stored = self.store.get(&Self::storage_key(identity.id)).await?;
        match stored {
            Some(stored) if constant_time_eq(stored.as_bytes(), token.as_bytes()) => {
                Ok(Some(identity))
            }
            _ => {
                debug!(client = %identity, "Refresh token does not match stored token");
                Ok(None)
            }
        }
    }
}
