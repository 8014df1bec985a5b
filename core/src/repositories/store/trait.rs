//! Generic expiring key/value cache holding refresh tokens and rate counters.

use async_trait::async_trait;

use crate::errors::DomainError;

/// Key/value store with per-key time-to-live
///
/// Failures are returned as `DomainError::Storage` and never retried by callers.
#[async_trait]
pub trait ExpiringStore: Send + Sync {
    /// Read a value; expired keys read as `None`
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Write a value that expires after `ttl_seconds`
    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<(), DomainError>;

    async fn delete(&self, key: &str) -> Result<(), DomainError>;

    /// Seconds left before the key expires; `None` when absent
    async fn ttl(&self, key: &str) -> Result<Option<u64>, DomainError>;
}
