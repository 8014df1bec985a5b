//! Expiring store configuration module

use serde::{Deserialize, Serialize};

/// Which expiring store implementation backs counters and refresh tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    Redis,
    Memory,
}

impl Default for CacheBackend {
    fn default() -> Self {
        CacheBackend::Redis
    }
}

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub backend: CacheBackend,

    /// Redis connection URL
    #[serde(default = "default_url")]
    pub url: String,

    /// Connection attempts before giving up
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay between connection attempts in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Prefix applied to every key written through the store
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            url: default_url(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            key_prefix: None,
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let url = std::env::var("REDIS_URL").unwrap_or_else(|_| default_url());
        let backend = match std::env::var("CACHE_BACKEND").as_deref() {
            Ok("memory") => CacheBackend::Memory,
            _ => CacheBackend::Redis,
        };
        let key_prefix = std::env::var("CACHE_KEY_PREFIX").ok();

        Self {
            backend,
            url,
            key_prefix,
            ..Default::default()
        }
    }

    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// In-process store, useful for tests and single-node development
    pub fn memory() -> Self {
        Self {
            backend: CacheBackend::Memory,
            ..Default::default()
        }
    }

    /// Apply the configured prefix to a key
    pub fn prefixed(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}{}", prefix, key),
            None => key.to_string(),
        }
    }
}

fn default_url() -> String {
    String::from("redis://localhost:6379")
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}
