//! Permission-check capability.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::{Capability, Identity};
use crate::errors::{AuthError, DomainResult};
use crate::repositories::AccountRepository;

/// Answers "does identity X hold permission Y"
#[async_trait]
pub trait PermissionChecker: Send + Sync {
    async fn has_capability(
        &self,
        identity: &Identity,
        capability: Capability,
    ) -> DomainResult<bool>;
}

/// Fails with `Forbidden` unless `caller` is present and holds `capability`
pub async fn require_capability(
    checker: &dyn PermissionChecker,
    caller: Option<&Identity>,
    capability: Capability,
) -> DomainResult<()> {
    let Some(caller) = caller else {
        return Err(AuthError::Forbidden.into());
    };
    if checker.has_capability(caller, capability).await? {
        Ok(())
    } else {
        Err(AuthError::Forbidden.into())
    }
}

/// Reads capabilities from the stored account. Service clients hold none.
pub struct AccountPermissionChecker<A: AccountRepository> {
    accounts: Arc<A>,
}

impl<A: AccountRepository> AccountPermissionChecker<A> {
    pub fn new(accounts: Arc<A>) -> Self {
        Self { accounts }
    }
}

#[async_trait]
impl<A: AccountRepository> PermissionChecker for AccountPermissionChecker<A> {
    async fn has_capability(
        &self,
        identity: &Identity,
        capability: Capability,
    ) -> DomainResult<bool> {
        if !identity.is_account() {
            return Ok(false);
        }
        Ok(self
            .accounts
            .find_by_id(identity.id)
            .await?
            .map_or(false, |account| account.has_capability(capability)))
    }
}
