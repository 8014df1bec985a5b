//! In-process account repository
//!
//! Used when no database URL is configured, and by the API integration tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use ag_core::domain::entities::{Account, Keypair, RateOverride};
use ag_core::errors::DomainError;
use ag_core::repositories::AccountRepository;

#[derive(Default)]
struct Tables {
    accounts: HashMap<i64, Account>,
    keypairs: HashMap<i64, Keypair>,
    overrides: HashMap<i64, RateOverride>,
}

/// Account repository held in memory
#[derive(Clone, Default)]
pub struct MemoryAccountRepository {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository holding `accounts`
    pub async fn seeded(accounts: impl IntoIterator<Item = Account>) -> Self {
        let repo = Self::new();
        for account in accounts {
            repo.insert(account).await;
        }
        repo
    }

    /// Insert or replace an account
    pub async fn insert(&self, account: Account) {
        self.tables.write().await.accounts.insert(account.id, account);
    }

    pub async fn len(&self) -> usize {
        self.tables.read().await.accounts.len()
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, DomainError> {
        Ok(self.tables.read().await.accounts.get(&id).cloned())
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<Account>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.accounts.values().find(|a| a.login == login).cloned())
    }

    async fn find_keypair_by_key(&self, key: &str) -> Result<Option<Keypair>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.keypairs.values().find(|k| k.key == key).cloned())
    }

    async fn find_keypair(&self, account_id: i64) -> Result<Option<Keypair>, DomainError> {
        Ok(self.tables.read().await.keypairs.get(&account_id).cloned())
    }

    async fn save_keypair(&self, keypair: &Keypair) -> Result<(), DomainError> {
        self.tables
            .write()
            .await
            .keypairs
            .insert(keypair.owner_account_id, keypair.clone());
        Ok(())
    }

    async fn find_rate_override(
        &self,
        account_id: i64,
    ) -> Result<Option<RateOverride>, DomainError> {
        Ok(self.tables.read().await.overrides.get(&account_id).copied())
    }

    async fn save_rate_override(
        &self,
        account_id: i64,
        rate_override: RateOverride,
    ) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if tables.accounts.contains_key(&account_id) {
            tables.overrides.insert(account_id, rate_override);
        }
        Ok(())
    }
}
