use async_trait::async_trait;

use crate::domain::entities::Identity;
use crate::domain::value_objects::{CredentialRequest, CredentialScheme};
use crate::errors::DomainResult;

/// One credential scheme
///
/// Returning `Ok(None)` means "not my credentials, or they did not match".
/// `Err` is reserved for failures the caller must see, such as a store outage.
#[async_trait]
pub trait Authenticator: Send + Sync {
    fn scheme(&self) -> CredentialScheme;

    /// `current` is the identity resolved so far. An authenticator must never
    /// replace a resolved identity with `None`.
    async fn authenticate(
        &self,
        current: Option<Identity>,
        request: &CredentialRequest,
    ) -> DomainResult<Option<Identity>>;
}
