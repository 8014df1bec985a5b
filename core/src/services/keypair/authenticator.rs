use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::Identity;
use crate::domain::value_objects::{CredentialRequest, CredentialScheme};
use crate::errors::DomainResult;
use crate::repositories::AccountRepository;
use crate::services::credentials::Authenticator;

use super::service::KeypairService;

/// Chain scheme reading `api_key`/`api_secret` from the request body
pub struct KeypairAuthenticator<A: AccountRepository> {
    keypairs: Arc<KeypairService<A>>,
}

impl<A: AccountRepository> KeypairAuthenticator<A> {
    pub fn new(keypairs: Arc<KeypairService<A>>) -> Self {
        Self { keypairs }
    }
}

#[async_trait]
impl<A: AccountRepository + 'static> Authenticator for KeypairAuthenticator<A> {
    fn scheme(&self) -> CredentialScheme {
        CredentialScheme::Keypair
    }

    async fn authenticate(
        &self,
        current: Option<Identity>,
        request: &CredentialRequest,
    ) -> DomainResult<Option<Identity>> {
        if current.is_some() {
            return Ok(current);
        }
        let (Some(key), Some(secret)) = (&request.api_key, &request.api_secret) else {
            return Ok(None);
        };

        Ok(self
            .keypairs
            .authenticate(key, secret)
            .await?
            .map(|account| Identity::account(account.id)))
    }
}
