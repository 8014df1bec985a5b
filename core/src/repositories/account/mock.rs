//! Mock implementation of AccountRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::{Account, Keypair, RateOverride};
use crate::errors::DomainError;

use super::trait_::AccountRepository;

/// Mock account repository for testing
#[derive(Clone)]
pub struct MockAccountRepository {
    accounts: Arc<RwLock<HashMap<i64, Account>>>,
    keypairs: Arc<RwLock<HashMap<i64, Keypair>>>,
    overrides: Arc<RwLock<HashMap<i64, RateOverride>>>,
}

impl MockAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            keypairs: Arc::new(RwLock::new(HashMap::new())),
            overrides: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn insert(&self, account: Account) {
        self.accounts.write().await.insert(account.id, account);
    }
}

impl Default for MockAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, DomainError> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.login == login).cloned())
    }

    async fn find_keypair_by_key(&self, key: &str) -> Result<Option<Keypair>, DomainError> {
        let keypairs = self.keypairs.read().await;
        Ok(keypairs.values().find(|k| k.key == key).cloned())
    }

    async fn find_keypair(&self, account_id: i64) -> Result<Option<Keypair>, DomainError> {
        Ok(self.keypairs.read().await.get(&account_id).cloned())
    }

    async fn save_keypair(&self, keypair: &Keypair) -> Result<(), DomainError> {
        self.keypairs
            .write()
            .await
            .insert(keypair.owner_account_id, keypair.clone());
        Ok(())
    }

    async fn find_rate_override(
        &self,
        account_id: i64,
    ) -> Result<Option<RateOverride>, DomainError> {
        Ok(self.overrides.read().await.get(&account_id).copied())
    }

    async fn save_rate_override(
        &self,
        account_id: i64,
        rate_override: RateOverride,
    ) -> Result<(), DomainError> {
        self.overrides.write().await.insert(account_id, rate_override);
        Ok(())
    }
}
