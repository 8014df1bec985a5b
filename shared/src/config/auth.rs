//! Token signing configuration

use serde::{Deserialize, Serialize};

/// Access tokens live for 30 days
pub const DEFAULT_ACCESS_TOKEN_TTL: i64 = 2_592_000;

/// Refresh tokens live for 365 days
pub const DEFAULT_REFRESH_TOKEN_TTL: i64 = 31_536_000;

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared HMAC secret. There is no built-in fallback: when absent every
    /// issue and validate call fails.
    #[serde(default)]
    pub secret: Option<String>,

    /// Issuer claim; the API base URL
    #[serde(default)]
    pub issuer: Option<String>,

    /// Access token lifetime in seconds
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl: i64,

    /// Refresh token lifetime in seconds
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: None,
            issuer: None,
            access_token_ttl: default_access_ttl(),
            refresh_token_ttl: default_refresh_ttl(),
        }
    }
}

impl JwtConfig {
    /// Create a configuration with the given secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Some(secret.into()),
            ..Default::default()
        }
    }

    /// Set the issuer claim
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Override the access token lifetime
    pub fn with_access_ttl(mut self, seconds: i64) -> Self {
        self.access_token_ttl = seconds;
        self
    }

    /// Override the refresh token lifetime
    pub fn with_refresh_ttl(mut self, seconds: i64) -> Self {
        self.refresh_token_ttl = seconds;
        self
    }

    /// Whether a non-empty secret is configured
    pub fn has_secret(&self) -> bool {
        self.secret.as_deref().map_or(false, |s| !s.is_empty())
    }

    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").ok().filter(|s| !s.is_empty());
        let issuer = std::env::var("JWT_ISSUER")
            .or_else(|_| std::env::var("API_BASE_URL"))
            .ok();
        let access_token_ttl = std::env::var("JWT_ACCESS_TTL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_access_ttl);
        let refresh_token_ttl = std::env::var("JWT_REFRESH_TTL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_refresh_ttl);

        Self {
            secret,
            issuer,
            access_token_ttl,
            refresh_token_ttl,
        }
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt: JwtConfig,

    /// Route (relative to the API namespace) that exchanges credentials for tokens
    #[serde(default = "default_auth_route")]
    pub auth_route: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            auth_route: default_auth_route(),
        }
    }
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            jwt: JwtConfig::from_env(),
            auth_route: std::env::var("AUTH_ROUTE").unwrap_or_else(|_| default_auth_route()),
        }
    }
}

fn default_access_ttl() -> i64 {
    DEFAULT_ACCESS_TOKEN_TTL
}

fn default_refresh_ttl() -> i64 {
    DEFAULT_REFRESH_TOKEN_TTL
}

fn default_auth_route() -> String {
    String::from("auth")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_lifetimes() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_ttl, 30 * 86_400);
        assert_eq!(config.refresh_token_ttl, 365 * 86_400);
    }

    #[test]
    fn test_empty_secret_counts_as_missing() {
        let mut config = JwtConfig::new("");
        assert!(!config.has_secret());
        config.secret = Some("s3cret".into());
        assert!(config.has_secret());
    }

    #[test]
    fn test_builder() {
        let config = JwtConfig::new("k")
            .with_issuer("https://audits.example.com/api")
            .with_access_ttl(60)
            .with_refresh_ttl(120);
        assert_eq!(config.issuer.as_deref(), Some("https://audits.example.com/api"));
        assert_eq!(config.access_token_ttl, 60);
        assert_eq!(config.refresh_token_ttl, 120);
    }
}
