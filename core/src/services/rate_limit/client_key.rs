//! Counter key derivation.

use crate::domain::entities::{ClientKind, Identity};
use crate::domain::value_objects::InboundRequest;

pub const ANONYMOUS_KEY_PREFIX: &str = "anonymous_";

pub const SERVICE_KEY_PREFIX: &str = "service_";

/// Supplies a counter key ahead of identity- and origin-based keys
pub trait ClientKeyOverride: Send + Sync {
    fn client_key(&self, request: &InboundRequest, identity: Option<&Identity>) -> Option<String>;
}

/// Key without the store prefix
pub(crate) fn derive(
    request: &InboundRequest,
    identity: Option<&Identity>,
    key_override: Option<&dyn ClientKeyOverride>,
) -> String {
    if let Some(key) = key_override.and_then(|o| o.client_key(request, identity)) {
        return key;
    }

    match identity {
        Some(Identity {
            id,
            kind: ClientKind::Account,
        }) => id.to_string(),
        Some(Identity {
            id,
            kind: ClientKind::Service,
        }) => format!("{}{}", SERVICE_KEY_PREFIX, id),
        None => format!(
            "{}{}",
            ANONYMOUS_KEY_PREFIX,
            request.origin().unwrap_or("unknown")
        ),
    }
}

/// Key used for an account outside of any request
pub(crate) fn for_account(account_id: i64) -> String {
    account_id.to_string()
}
