use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::Identity;
use crate::domain::value_objects::{CredentialRequest, CredentialScheme};
use crate::errors::{AuthError, DomainResult};

use super::authenticator::Authenticator;

/// Identity produced by the chain and the scheme that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainResolution {
    pub identity: Identity,
    pub scheme: CredentialScheme,
}

/// Ordered authenticators ahead of a fallback
pub struct CredentialChain {
    authenticators: Vec<Arc<dyn Authenticator>>,
    fallback: Option<Arc<dyn Authenticator>>,
}

impl CredentialChain {
    pub fn new() -> Self {
        Self {
            authenticators: Vec::new(),
            fallback: None,
        }
    }

    /// Appends a scheme; registration order is priority order
    pub fn register(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticators.push(authenticator);
        self
    }

    /// Scheme tried only when no registered scheme resolved an identity
    pub fn with_fallback(mut self, fallback: Arc<dyn Authenticator>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn schemes(&self) -> Vec<CredentialScheme> {
        self.authenticators
            .iter()
            .chain(self.fallback.iter())
            .map(|a| a.scheme())
            .collect()
    }

    /// Resolves the request to an identity
    ///
    /// # Returns
    ///
    /// * `Ok(ChainResolution)` - First scheme that succeeded
    /// * `Err(AuthError::InvalidCredentials)` - Every scheme declined
    /// * `Err(_)` - A scheme failed, e.g. the store was unreachable
    pub async fn resolve(&self, request: &CredentialRequest) -> DomainResult<ChainResolution> {
        for authenticator in self.authenticators.iter().chain(self.fallback.iter()) {
            if let Some(identity) = authenticator.authenticate(None, request).await? {
                debug!(
                    client = %identity,
                    scheme = authenticator.scheme().as_str(),
                    "Credentials resolved"
                );
                return Ok(ChainResolution {
                    identity,
                    scheme: authenticator.scheme(),
                });
            }
        }

        warn!(
            username = request.username.as_deref().unwrap_or(""),
            "No credential scheme resolved the request"
        );
        Err(AuthError::InvalidCredentials.into())
    }
}

impl Default for CredentialChain {
    fn default() -> Self {
        Self::new()
    }
}
