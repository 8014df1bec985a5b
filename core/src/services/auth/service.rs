//! Main authentication service implementation

use std::sync::Arc;

use tracing::info;

use crate::domain::value_objects::{AccessGrant, CredentialRequest, CredentialScheme};
use crate::errors::{DomainResult, TokenError};
use crate::repositories::{AccountRepository, ExpiringStore};
use crate::services::credentials::CredentialChain;
use crate::services::refresh::RefreshTokenService;
use crate::services::token::TokenService;

/// Backs the token issuance route
pub struct AuthService<A, S>
where
    A: AccountRepository,
    S: ExpiringStore,
{
    chain: CredentialChain,
    tokens: Arc<TokenService>,
    refresh: Arc<RefreshTokenService<S>>,
    accounts: Arc<A>,
}

impl<A, S> AuthService<A, S>
where
    A: AccountRepository,
    S: ExpiringStore,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `chain` - Credential schemes in priority order, with the password fallback
    /// * `tokens` - Token service for access tokens
    /// * `refresh` - Refresh flow appended to every grant
    /// * `accounts` - Account lookup for the grant's account view
    pub fn new(
        chain: CredentialChain,
        tokens: Arc<TokenService>,
        refresh: Arc<RefreshTokenService<S>>,
        accounts: Arc<A>,
    ) -> Self {
        Self {
            chain,
            tokens,
            refresh,
            accounts,
        }
    }

    /// Exchanges credentials for an access token and, unless the credentials
    /// were themselves a refresh token, a refresh token
    ///
    /// # Returns
    ///
    /// * `Ok(AccessGrant)` - Tokens for the resolved identity
    /// * `Err(TokenError::SecretMissing)` - Checked before any credential
    /// * `Err(AuthError::InvalidCredentials)` - No scheme resolved the request
    pub async fn generate_token(&self, request: &CredentialRequest) -> DomainResult<AccessGrant> {
        if !self.tokens.has_secret() {
            return Err(TokenError::SecretMissing.into());
        }

        let resolution = self.chain.resolve(request).await?;
        let identity = resolution.identity;

        let access_token = self.tokens.issue_access(&identity)?;

        let refresh_token = match resolution.scheme {
            CredentialScheme::RefreshToken => None,
            _ => Some(self.refresh.append_refresh(&identity).await?),
        };

        let account = if identity.is_account() {
            self.accounts
                .find_by_id(identity.id)
                .await?
                .map(|account| account.to_public())
        } else {
            None
        };

        info!(
            client = %identity,
            scheme = resolution.scheme.as_str(),
            "Access token issued"
        );

        Ok(AccessGrant {
            access_token,
            refresh_token,
            client: identity,
            account,
        })
    }
}
