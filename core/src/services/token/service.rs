//! Main token service implementation

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::entities::{Claims, ClientClaim, Identity, TokenType, RESERVED_CLAIMS};
use crate::errors::{DomainError, DomainResult, TokenError};

use super::config::TokenServiceConfig;
use super::hooks::{ClaimsProvider, ExpiryWaiver};

struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Issues and validates HS256 bearer tokens
///
/// Issuing and validating are pure in-memory operations. Tokens are never
/// persisted here; the refresh flow owns refresh token storage.
pub struct TokenService {
    config: TokenServiceConfig,
    keys: Option<SigningKeys>,
    validation: Validation,
    claims_provider: Option<Arc<dyn ClaimsProvider>>,
    expiry_waiver: Option<Arc<dyn ExpiryWaiver>>,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// A missing secret is not an error here: the service still starts, and
    /// every issue or validate call reports `SecretMissing`.
    pub fn new(config: TokenServiceConfig) -> Self {
        let keys = config
            .secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|secret| SigningKeys {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
            });

        // Claim checks run by hand after decoding so each failure keeps its own error
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims = HashSet::new();

        Self {
            config,
            keys,
            validation,
            claims_provider: None,
            expiry_waiver: None,
        }
    }

    pub fn with_claims_provider(mut self, provider: Arc<dyn ClaimsProvider>) -> Self {
        self.claims_provider = Some(provider);
        self
    }

    pub fn with_expiry_waiver(mut self, waiver: Arc<dyn ExpiryWaiver>) -> Self {
        self.expiry_waiver = Some(waiver);
        self
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    pub fn has_secret(&self) -> bool {
        self.keys.is_some()
    }

    fn keys(&self) -> DomainResult<&SigningKeys> {
        self.keys
            .as_ref()
            .ok_or_else(|| TokenError::SecretMissing.into())
    }

    /// Signs a token for `identity`
    ///
    /// # Arguments
    ///
    /// * `identity` - Client placed in the `client` claim
    /// * `extra` - Private claims; reserved names are ignored
    /// * `ttl` - Lifetime in seconds
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The encoded token
    /// * `Err(TokenError::SecretMissing)` - No signing secret configured
    pub fn issue(
        &self,
        identity: &Identity,
        extra: Map<String, Value>,
        ttl: i64,
    ) -> DomainResult<String> {
        self.sign(identity, extra, ttl, None)
    }

    /// Access token with the configured lifetime and any provider claims
    pub fn issue_access(&self, identity: &Identity) -> DomainResult<String> {
        let extra = self
            .claims_provider
            .as_ref()
            .map(|p| p.claims_for(identity))
            .unwrap_or_default();
        self.sign(identity, extra, self.config.access_token_ttl, None)
    }

    /// Refresh token: same claim shape plus `token_type = refresh`
    pub fn issue_refresh(&self, identity: &Identity) -> DomainResult<String> {
        self.sign(
            identity,
            Map::new(),
            self.config.refresh_token_ttl,
            Some(TokenType::Refresh),
        )
    }

    fn sign(
        &self,
        identity: &Identity,
        mut extra: Map<String, Value>,
        ttl: i64,
        token_type: Option<TokenType>,
    ) -> DomainResult<String> {
        let keys = self.keys()?;

        for reserved in RESERVED_CLAIMS {
            extra.remove(*reserved);
        }

        let now = Utc::now().timestamp();
        let claims = Claims {
            iat: now,
            iss: self.config.issuer.clone(),
            exp: now.saturating_add(ttl),
            client: ClientClaim::from(identity),
            token_type,
            private: extra,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding).map_err(|e| {
            DomainError::Internal {
                message: format!("Failed to encode token: {}", e),
            }
        })
    }

    /// Verifies the signature and runs the claim checks in order:
    /// issuer, client id, expiry. The first failure wins.
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Decoded and checked claims
    /// * `Err(TokenError)` - `InvalidToken` for any decode failure, otherwise
    ///   the failing check
    pub fn validate(&self, token: &str) -> DomainResult<Claims> {
        let claims = self.decode_verified(token)?;

        if claims.iss != self.config.issuer {
            debug!(issuer = %claims.iss, "Token issuer mismatch");
            return Err(TokenError::InvalidIssuer.into());
        }

        if claims.client.id.is_none() {
            return Err(TokenError::InvalidClient.into());
        }

        if claims.is_expired_at(Utc::now().timestamp()) {
            let waived = self
                .expiry_waiver
                .as_ref()
                .map_or(false, |w| w.waive(&claims));
            if !waived {
                return Err(TokenError::TokenExpired.into());
            }
            debug!(client_id = ?claims.client.id, "Token expiry waived");
        }

        Ok(claims)
    }

    /// Signature and structure check only; no claim checks
    pub fn decode_verified(&self, token: &str) -> DomainResult<Claims> {
        let keys = self.keys()?;

        decode::<Claims>(token, &keys.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "Token decode failed");
                TokenError::InvalidToken.into()
            })
    }

    /// Pulls the token out of an `Authorization` header value
    ///
    /// # Returns
    ///
    /// * `Err(TokenError::NoAuthHeader)` - Header absent
    /// * `Err(TokenError::MalformedToken)` - Not `Bearer <token>`
    pub fn extract_bearer(header: Option<&str>) -> DomainResult<&str> {
        let value = header.ok_or(TokenError::NoAuthHeader)?;

        value
            .strip_prefix("Bearer ")
            .and_then(|rest| rest.split_whitespace().next())
            .ok_or_else(|| TokenError::MalformedToken.into())
    }

    /// Extracts and validates the bearer token of a request
    pub fn validate_header(&self, header: Option<&str>) -> DomainResult<Claims> {
        // Secret first, then header
        self.keys()?;
        let token = Self::extract_bearer(header)?;
        self.validate(token)
    }
}
