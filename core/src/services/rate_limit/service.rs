//! Rate limiter implementation

use std::sync::Arc;

use ag_shared::config::RateLimitConfig;
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::entities::{Capability, Identity, RateCounter, RateOverride, RateSettings};
use crate::domain::value_objects::{InboundRequest, QuotaSnapshot, RateDecision, RequestMeter};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{AccountRepository, ExpiringStore};
use crate::services::permission::{require_capability, PermissionChecker};

use super::client_key::{self, ClientKeyOverride};

/// Effective quota and current usage of one account
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateUsage {
    pub account_id: i64,
    pub settings: RateSettings,
    /// Stored override, if any
    pub rate_override: Option<RateOverride>,
    /// Counter for the current window; absent when no metered request was made
    pub counter: Option<RateCounter>,
}

/// Persisted windowed counter per client key
///
/// The load, compute and store steps are not atomic: concurrent requests from
/// one client may read the same `used` value and both be admitted. The limit is
/// therefore soft under concurrency.
pub struct RateLimiter<A, S>
where
    A: AccountRepository,
    S: ExpiringStore,
{
    config: RateLimitConfig,
    store: Arc<S>,
    accounts: Arc<A>,
    permissions: Arc<dyn PermissionChecker>,
    key_override: Option<Arc<dyn ClientKeyOverride>>,
}

impl<A, S> RateLimiter<A, S>
where
    A: AccountRepository,
    S: ExpiringStore,
{
    pub fn new(
        config: RateLimitConfig,
        store: Arc<S>,
        accounts: Arc<A>,
        permissions: Arc<dyn PermissionChecker>,
    ) -> Self {
        Self {
            config,
            store,
            accounts,
            permissions,
            key_override: None,
        }
    }

    pub fn with_key_override(mut self, key_override: Arc<dyn ClientKeyOverride>) -> Self {
        self.key_override = Some(key_override);
        self
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    fn default_settings(&self) -> RateSettings {
        RateSettings {
            limit: self.config.default_limit,
            interval: self.config.default_interval,
        }
    }

    /// GET requests, free routes, and everything when limiting is disabled
    pub fn is_exempt(&self, request: &InboundRequest) -> bool {
        !self.config.enabled
            || request.is_get()
            || self
                .config
                .free_routes
                .iter()
                .any(|route| route.trim_matches('/') == request.route)
    }

    /// Store key for the counter of this request's client
    pub fn client_key(&self, request: &InboundRequest, identity: Option<&Identity>) -> String {
        let key = client_key::derive(request, identity, self.key_override.as_deref());
        format!("{}{}", self.config.key_prefix, key)
    }

    /// Override-or-default quota for an identity; anonymous and service clients get the default
    pub async fn resolve_settings(&self, identity: Option<&Identity>) -> DomainResult<RateSettings> {
        let default = self.default_settings();
        match identity {
            Some(identity) if identity.is_account() => Ok(self
                .accounts
                .find_rate_override(identity.id)
                .await?
                .map_or(default, |o| o.resolve(default))),
            _ => Ok(default),
        }
    }

    /// Counts one request against its client's quota
    ///
    /// # Arguments
    ///
    /// * `request` - The inbound request
    /// * `identity` - Identity resolved by the gate, if any
    /// * `meter` - Per-request guard; a second call for the same request is a no-op
    ///
    /// # Returns
    ///
    /// * `Ok(RateDecision)` - Exempt, already metered, admitted or rejected
    /// * `Err(DomainError::Storage)` - Counter could not be read or written
    pub async fn check(
        &self,
        request: &InboundRequest,
        identity: Option<&Identity>,
        meter: &mut RequestMeter,
    ) -> DomainResult<RateDecision> {
        if self.is_exempt(request) {
            return Ok(RateDecision::Exempt);
        }
        if meter.is_deducted() {
            return Ok(RateDecision::AlreadyMetered);
        }

        let key = self.client_key(request, identity);
        let now = Utc::now().timestamp();

        let mut counter = match self.load_counter(&key).await? {
            Some(counter) if !counter.has_elapsed(now) => counter,
            Some(_) => {
                debug!(client_key = %key, "Rate window rolled over");
                RateCounter::new(key.clone(), self.resolve_settings(identity).await?, now)
            }
            None => RateCounter::new(key.clone(), self.resolve_settings(identity).await?, now),
        };

        let exceeded = counter.remaining() <= 0;
        counter.used = counter.used.saturating_add(1);
        meter.mark_deducted();

        if exceeded {
            // A rejected request does not consume quota
            counter.used -= 1;
        }

        let reset = counter.seconds_until_reset(now);
        self.store_counter(&counter, reset.max(1)).await?;

        if exceeded {
            warn!(client_key = %key, limit = counter.limit, reset, "Rate limit exceeded");
            return Ok(RateDecision::Rejected(QuotaSnapshot {
                limit: counter.limit,
                remaining: 0,
                reset,
            }));
        }

        let remaining = counter.remaining().max(0) as u32;
        debug!(client_key = %key, used = counter.used, remaining, "Request metered");
        Ok(RateDecision::Admitted(QuotaSnapshot {
            limit: counter.limit,
            remaining,
            reset,
        }))
    }

    /// Stores an account's override and restarts its window with `used = 0`
    ///
    /// # Returns
    ///
    /// * `Err(AuthError::Forbidden)` - Caller lacks `ManageAccounts`
    /// * `Err(DomainError::NotFound)` - No such account
    pub async fn update_override(
        &self,
        caller: Option<&Identity>,
        account_id: i64,
        rate_override: RateOverride,
    ) -> DomainResult<RateUsage> {
        require_capability(self.permissions.as_ref(), caller, Capability::ManageAccounts).await?;
        self.require_account(account_id).await?;

        self.accounts
            .save_rate_override(account_id, rate_override)
            .await?;

        let settings = rate_override.resolve(self.default_settings());
        let key = format!("{}{}", self.config.key_prefix, client_key::for_account(account_id));
        let counter = RateCounter::new(key, settings, Utc::now().timestamp());
        self.store_counter(&counter, settings.interval.max(1)).await?;

        debug!(account_id, limit = settings.limit, interval = settings.interval, "Rate override saved");

        Ok(RateUsage {
            account_id,
            settings,
            rate_override: Some(rate_override),
            counter: Some(counter),
        })
    }

    /// Quota and usage of an account; readable by the account itself or a manager
    pub async fn usage(&self, caller: Option<&Identity>, account_id: i64) -> DomainResult<RateUsage> {
        let is_self = caller.map_or(false, |c| c.is_account() && c.id == account_id);
        if !is_self {
            require_capability(self.permissions.as_ref(), caller, Capability::ManageAccounts)
                .await?;
        }
        self.require_account(account_id).await?;

        let rate_override = self.accounts.find_rate_override(account_id).await?;
        let settings = rate_override.map_or(self.default_settings(), |o| {
            o.resolve(self.default_settings())
        });
        let key = format!("{}{}", self.config.key_prefix, client_key::for_account(account_id));
        let counter = self
            .load_counter(&key)
            .await?
            .filter(|c| !c.has_elapsed(Utc::now().timestamp()));

        Ok(RateUsage {
            account_id,
            settings,
            rate_override,
            counter,
        })
    }

    async fn require_account(&self, account_id: i64) -> DomainResult<()> {
        match self.accounts.find_by_id(account_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound {
                resource: format!("account {}", account_id),
            }),
        }
    }

    async fn load_counter(&self, key: &str) -> DomainResult<Option<RateCounter>> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw).map(Some).map_err(|e| {
            warn!(client_key = %key, error = %e, "Unreadable rate counter");
            DomainError::storage(format!("Unreadable rate counter {}: {}", key, e))
        })
    }

    async fn store_counter(&self, counter: &RateCounter, ttl: u64) -> DomainResult<()> {
        let raw = serde_json::to_string(counter).map_err(|e| DomainError::Internal {
            message: format!("Failed to serialize rate counter: {}", e),
        })?;
        self.store
            .set_with_expiry(&counter.client_key, &raw, ttl)
            .await
    }
}
