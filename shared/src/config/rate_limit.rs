//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Requests allowed per window when no per-account override exists
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Window length in seconds when no per-account override exists
    #[serde(default = "default_interval")]
    pub default_interval: u64,

    /// Routes (relative to the API namespace) that are never metered, whatever the method
    #[serde(default = "default_free_routes")]
    pub free_routes: Vec<String>,

    /// Prefix for counter keys in the expiring store
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            default_limit: default_limit(),
            default_interval: default_interval(),
            free_routes: default_free_routes(),
            key_prefix: default_key_prefix(),
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: std::env::var("RATE_LIMIT_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enabled),
            default_limit: std::env::var("RATE_LIMIT_DEFAULT_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_limit),
            default_interval: std::env::var("RATE_LIMIT_DEFAULT_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_interval),
            ..defaults
        }
    }

    /// Set the global default quota
    pub fn with_defaults(mut self, limit: u32, interval: u64) -> Self {
        self.default_limit = limit;
        self.default_interval = interval;
        self
    }

    /// Add a route that is never metered
    pub fn with_free_route(mut self, route: impl Into<String>) -> Self {
        self.free_routes.push(route.into());
        self
    }

    /// Disable rate limiting entirely
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_limit() -> u32 {
    1000
}

fn default_interval() -> u64 {
    86_400
}

fn default_free_routes() -> Vec<String> {
    vec![String::from("auth")]
}

fn default_key_prefix() -> String {
    String::from("rate_counter:")
}
