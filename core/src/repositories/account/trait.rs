//! Account repository trait defining the account-lookup capability.
//!
//! Besides the account itself, the repository owns the per-account data the
//! credential layer persists: the keypair and the rate-limit override.

use async_trait::async_trait;

use crate::domain::entities::{Account, Keypair, RateOverride};
use crate::errors::DomainError;

/// Repository trait for account lookups and per-account credential data
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by its id
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No such account
    /// * `Err(DomainError)` - Storage failure
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, DomainError>;

    /// Find an account by its login name
    async fn find_by_login(&self, login: &str) -> Result<Option<Account>, DomainError>;

    /// Find the keypair whose key equals `key`
    async fn find_keypair_by_key(&self, key: &str) -> Result<Option<Keypair>, DomainError>;

    /// Find the keypair currently stored for an account
    async fn find_keypair(&self, account_id: i64) -> Result<Option<Keypair>, DomainError>;

    /// Store a keypair, replacing any prior pair for the same account
    async fn save_keypair(&self, keypair: &Keypair) -> Result<(), DomainError>;

    /// Per-account rate-limit override; `None` when never set
    async fn find_rate_override(&self, account_id: i64)
        -> Result<Option<RateOverride>, DomainError>;

    async fn save_rate_override(
        &self,
        account_id: i64,
        rate_override: RateOverride,
    ) -> Result<(), DomainError>;
}
