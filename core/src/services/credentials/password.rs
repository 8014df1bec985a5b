use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::Identity;
use crate::domain::value_objects::{CredentialRequest, CredentialScheme};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::AccountRepository;

use super::authenticator::Authenticator;

/// Checks `username`/`password` body fields against the account store
pub struct PasswordAuthenticator<A: AccountRepository> {
    accounts: Arc<A>,
}

impl<A: AccountRepository> PasswordAuthenticator<A> {
    pub fn new(accounts: Arc<A>) -> Self {
        Self { accounts }
    }
}

#[async_trait]
impl<A: AccountRepository + 'static> Authenticator for PasswordAuthenticator<A> {
    fn scheme(&self) -> CredentialScheme {
        CredentialScheme::Password
    }

    async fn authenticate(
        &self,
        current: Option<Identity>,
        request: &CredentialRequest,
    ) -> DomainResult<Option<Identity>> {
        if current.is_some() {
            return Ok(current);
        }
        let (Some(username), Some(password)) = (&request.username, &request.password) else {
            return Ok(None);
        };
        if username.is_empty() || password.is_empty() {
            return Ok(None);
        }

        let Some(account) = self.accounts.find_by_login(username).await? else {
            return Ok(None);
        };

        let password = password.clone();
        let hash = account.password_hash.clone();
        // bcrypt is CPU-bound
        let matches = tokio::task::spawn_blocking(move || {
            bcrypt::verify(password, &hash).unwrap_or(false)
        })
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Password check failed: {}", e),
        })?;

        Ok(matches.then(|| Identity::account(account.id)))
    }
}
