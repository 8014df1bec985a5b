//! In-process expiring store

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

use ag_core::errors::DomainError;
use ag_core::repositories::ExpiringStore;

/// Ceiling for TTLs the clock cannot represent
const MAX_TTL_SECONDS: u64 = 100 * 365 * 24 * 60 * 60;

struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Expiring store kept in a process-local map
///
/// Counters are not shared between server instances, so quotas only hold
/// per process when this backend is used.
#[derive(Clone, Default)]
pub struct MemoryExpiringStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl MemoryExpiringStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every expired entry
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        before - entries.len()
    }

    /// Purge expired entries every `period` until the handle is aborted
    ///
    /// Reads already skip expired entries; this bounds memory for keys that
    /// are never read again, such as counters of one-off anonymous clients.
    pub fn spawn_purge_task(&self, period: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let purged = store.purge_expired().await;
                if purged > 0 {
                    debug!(purged, "Expired store entries purged");
                }
            }
        })
    }

    /// Number of entries held, expired ones included
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl ExpiringStore for MemoryExpiringStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone()))
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<(), DomainError> {
        let now = Instant::now();
        let expires_at = now
            .checked_add(Duration::from_secs(ttl_seconds.max(1)))
            .unwrap_or_else(|| now + Duration::from_secs(MAX_TTL_SECONDS));
        let entry = Entry {
            value: value.to_string(),
            expires_at,
        };
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn ttl(&self, key: &str) -> Result<Option<u64>, DomainError> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| (entry.expires_at - now).as_secs()))
    }
}
