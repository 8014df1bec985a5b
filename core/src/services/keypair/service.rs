//! Keypair service implementation

use std::sync::Arc;

use constant_time_eq::constant_time_eq;
use tracing::{debug, info, warn};

use crate::domain::entities::{Capability, Identity, Keypair, PublicAccount};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::AccountRepository;
use crate::services::permission::{require_capability, PermissionChecker};

/// Owns keypair lookup, generation and rotation
pub struct KeypairService<A: AccountRepository> {
    accounts: Arc<A>,
    permissions: Arc<dyn PermissionChecker>,
}

impl<A: AccountRepository> KeypairService<A> {
    pub fn new(accounts: Arc<A>, permissions: Arc<dyn PermissionChecker>) -> Self {
        Self {
            accounts,
            permissions,
        }
    }

    /// Resolves a key/secret pair to its owner
    ///
    /// # Returns
    ///
    /// * `Ok(Some(PublicAccount))` - Pair matched; sensitive fields stripped
    /// * `Ok(None)` - Unknown key, wrong secret, or owner no longer exists
    /// * `Err(DomainError)` - Storage failure
    pub async fn authenticate(
        &self,
        key: &str,
        secret: &str,
    ) -> DomainResult<Option<PublicAccount>> {
        if key.is_empty() || secret.is_empty() {
            return Ok(None);
        }

        let Some(stored) = self.accounts.find_keypair_by_key(key).await? else {
            debug!("Unknown api key");
            return Ok(None);
        };

        if !constant_time_eq(stored.secret.as_bytes(), secret.as_bytes()) {
            warn!(account_id = stored.owner_account_id, "Api secret mismatch");
            return Ok(None);
        }

        Ok(self
            .accounts
            .find_by_id(stored.owner_account_id)
            .await?
            .map(|account| account.to_public()))
    }

    /// Generates and stores a new pair, overwriting the previous one
    ///
    /// # Arguments
    ///
    /// * `caller` - Requesting identity; must hold `ManageAccounts`
    /// * `account_id` - Account receiving the pair
    ///
    /// # Returns
    ///
    /// * `Err(AuthError::Forbidden)` - Caller lacks permission or the account does not exist
    pub async fn generate(
        &self,
        caller: Option<&Identity>,
        account_id: i64,
    ) -> DomainResult<Keypair> {
        self.authorize(caller, account_id).await?;

        let keypair = Keypair::generate(account_id);
        self.accounts.save_keypair(&keypair).await?;
        info!(account_id, "Keypair rotated");

        Ok(keypair)
    }

    /// Currently stored pair; `None` when never generated
    pub async fn fetch(
        &self,
        caller: Option<&Identity>,
        account_id: i64,
    ) -> DomainResult<Option<Keypair>> {
        self.authorize(caller, account_id).await?;
        self.accounts.find_keypair(account_id).await
    }

    /// Stored pair for the account, generating one the first time
    pub async fn ensure(&self, account_id: i64) -> DomainResult<Keypair> {
        if let Some(existing) = self.accounts.find_keypair(account_id).await? {
            return Ok(existing);
        }
        if self.accounts.find_by_id(account_id).await?.is_none() {
            return Err(DomainError::NotFound {
                resource: format!("account {}", account_id),
            });
        }

        let keypair = Keypair::generate(account_id);
        self.accounts.save_keypair(&keypair).await?;
        info!(account_id, "Keypair provisioned");

        Ok(keypair)
    }

    async fn authorize(&self, caller: Option<&Identity>, account_id: i64) -> DomainResult<()> {
        require_capability(self.permissions.as_ref(), caller, Capability::ManageAccounts).await?;

        if self.accounts.find_by_id(account_id).await?.is_none() {
            return Err(AuthError::Forbidden.into());
        }
        Ok(())
    }
}
