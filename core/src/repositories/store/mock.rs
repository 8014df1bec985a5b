//! Mock implementation of ExpiringStore for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainError;

use super::trait_::ExpiringStore;

/// In-memory store that records TTLs without expiring anything.
/// Tests drive expiry by seeding stale values directly.
#[derive(Clone, Default)]
pub struct MockExpiringStore {
    entries: Arc<RwLock<HashMap<String, (String, u64)>>>,
    fail: Arc<AtomicBool>,
}

impl MockExpiringStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a storage error
    pub fn fail_all(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub async fn recorded_ttl(&self, key: &str) -> Option<u64> {
        self.entries.read().await.get(key).map(|(_, ttl)| *ttl)
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::storage("store unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl ExpiringStore for MockExpiringStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        self.check()?;
        Ok(self.entries.read().await.get(key).map(|(v, _)| v.clone()))
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<(), DomainError> {
        self.check()?;
        self.entries
            .write()
            .await
            .insert(key.to_string(), (value.to_string(), ttl_seconds));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        self.check()?;
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn ttl(&self, key: &str) -> Result<Option<u64>, DomainError> {
        self.check()?;
        Ok(self.recorded_ttl(key).await)
    }
}
