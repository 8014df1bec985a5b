//! Configuration for the token service

use ag_shared::config::auth::{JwtConfig, DEFAULT_ACCESS_TOKEN_TTL, DEFAULT_REFRESH_TOKEN_TTL};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// HMAC secret; `None` makes every issue and validate call fail
    pub secret: Option<String>,
    /// Expected `iss` claim, the API base URL
    pub issuer: String,
    /// Access token lifetime in seconds
    pub access_token_ttl: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_ttl: i64,
}

impl TokenServiceConfig {
    pub fn new(secret: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            secret: Some(secret.into()),
            issuer: issuer.into(),
            access_token_ttl: DEFAULT_ACCESS_TOKEN_TTL,
            refresh_token_ttl: DEFAULT_REFRESH_TOKEN_TTL,
        }
    }

    /// Build from the shared JWT section; `api_base_url` is used when no
    /// issuer is configured explicitly
    pub fn from_jwt_config(config: &JwtConfig, api_base_url: &str) -> Self {
        Self {
            secret: config.secret.clone().filter(|s| !s.is_empty()),
            issuer: config
                .issuer
                .clone()
                .unwrap_or_else(|| api_base_url.to_string()),
            access_token_ttl: config.access_token_ttl,
            refresh_token_ttl: config.refresh_token_ttl,
        }
    }
}
