use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::Identity;
use crate::domain::value_objects::{CredentialRequest, CredentialScheme};
use crate::errors::DomainResult;
use crate::repositories::ExpiringStore;
use crate::services::credentials::Authenticator;

use super::service::RefreshTokenService;

/// Chain scheme reading a refresh token from the `Authorization` header
pub struct RefreshTokenAuthenticator<S: ExpiringStore> {
    refresh: Arc<RefreshTokenService<S>>,
}

impl<S: ExpiringStore> RefreshTokenAuthenticator<S> {
    pub fn new(refresh: Arc<RefreshTokenService<S>>) -> Self {
        Self { refresh }
    }
}

#[async_trait]
impl<S: ExpiringStore + 'static> Authenticator for RefreshTokenAuthenticator<S> {
    fn scheme(&self) -> CredentialScheme {
        CredentialScheme::RefreshToken
    }

    async fn authenticate(
        &self,
        current: Option<Identity>,
        request: &CredentialRequest,
    ) -> DomainResult<Option<Identity>> {
        if current.is_some() {
            return Ok(current);
        }
        self.refresh
            .authenticate_with_refresh(request.authorization.as_deref())
            .await
    }
}
