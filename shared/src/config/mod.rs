//! Configuration module with business-specific sub-modules
//!
//! - `auth` - Token signing secret, issuer and token lifetimes
//! - `cache` - Expiring store backend (Redis or in-process)
//! - `database` - Account database connection
//! - `environment` - Environment detection and logging configuration
//! - `rate_limit` - Request quota defaults and free routes
//! - `server` - HTTP bind address and API namespace

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod rate_limit;
pub mod server;

use serde::{Deserialize, Serialize};

pub use auth::{AuthConfig, JwtConfig};
pub use cache::{CacheBackend, CacheConfig};
pub use database::DatabaseConfig;
pub use environment::{Environment, LoggingConfig};
pub use rate_limit::RateLimitConfig;
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub environment: Environment,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load every section from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            cache: CacheConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Base URL of the API, used as the token issuer when none is configured
    pub fn api_base_url(&self) -> String {
        self.server.api_base_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_signing_secret() {
        let config = AppConfig::default();
        assert!(config.auth.jwt.secret.is_none());
        assert_eq!(config.rate_limit.default_limit, 1000);
        assert_eq!(config.rate_limit.default_interval, 86_400);
    }
}
