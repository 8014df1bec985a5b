//! Redis-backed expiring store
//!
//! Holds refresh tokens and rate counters. Only the initial connect is
//! retried; a failed command surfaces as a storage error on the first attempt.

use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use ag_core::errors::DomainError;
use ag_core::repositories::ExpiringStore;

use crate::cache::CacheConfig;
use crate::InfrastructureError;

const MAX_BACKOFF_MS: u64 = 5000;

/// Redis expiring store with connection retry
#[derive(Clone)]
pub struct RedisExpiringStore {
    connection: MultiplexedConnection,
    config: CacheConfig,
}

impl RedisExpiringStore {
    /// Connect to Redis
    ///
    /// # Arguments
    /// * `config` - Cache configuration; `max_retries` and `retry_delay_ms`
    ///   drive the connect attempts
    ///
    /// # Returns
    /// * `Err(InfrastructureError::Config)` - The URL does not parse
    /// * `Err(InfrastructureError::Cache)` - No connection after all attempts
    pub async fn connect(config: CacheConfig) -> Result<Self, InfrastructureError> {
        info!("Connecting expiring store to Redis at {}", mask_url(&config.url));

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection =
            Self::create_connection_with_retry(&client, config.max_retries, config.retry_delay_ms)
                .await?;

        Ok(Self { connection, config })
    }

    async fn create_connection_with_retry(
        client: &Client,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            match client.get_multiplexed_async_connection().await {
                Ok(connection) => {
                    info!("Connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(MAX_BACKOFF_MS);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    fn storage_error(op: &str, key: &str, e: RedisError) -> DomainError {
        error!("Redis {} failed for key '{}': {}", op, key, e);
        InfrastructureError::Cache(e).into()
    }
}

#[async_trait]
impl ExpiringStore for RedisExpiringStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let mut conn = self.connection.clone();
        conn.get::<_, Option<String>>(self.config.prefixed(key))
            .await
            .map_err(|e| Self::storage_error("GET", key, e))
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<(), DomainError> {
        let full_key = self.config.prefixed(key);
        // SET EX rejects zero
        let ttl = ttl_seconds.max(1);
        debug!("Setting key '{}' with expiry {}s", full_key, ttl);

        let mut conn = self.connection.clone();
        conn.set_ex::<_, _, ()>(full_key, value, ttl)
            .await
            .map_err(|e| Self::storage_error("SET", key, e))
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        let mut conn = self.connection.clone();
        conn.del::<_, u32>(self.config.prefixed(key))
            .await
            .map(|_| ())
            .map_err(|e| Self::storage_error("DEL", key, e))
    }

    async fn ttl(&self, key: &str) -> Result<Option<u64>, DomainError> {
        let mut conn = self.connection.clone();
        let ttl = conn
            .ttl::<_, i64>(self.config.prefixed(key))
            .await
            .map_err(|e| Self::storage_error("TTL", key, e))?;

        // -2: no such key, -1: no expiry
        Ok(u64::try_from(ttl).ok())
    }
}

/// Hide the password part of a Redis URL for logging
fn mask_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &url[..scheme_end], &url[at..])
        }
        _ => url.to_string(),
    }
}
