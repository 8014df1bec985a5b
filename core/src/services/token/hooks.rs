//! Extension points registered once at startup.

use serde_json::{Map, Value};

use crate::domain::entities::{Claims, Identity};

/// Contributes private claims to every access token.
/// Reserved claim names are dropped from the returned map.
pub trait ClaimsProvider: Send + Sync {
    fn claims_for(&self, identity: &Identity) -> Map<String, Value>;
}

/// Decides whether an expired token is still accepted.
/// Runs only after the issuer and client checks have passed.
pub trait ExpiryWaiver: Send + Sync {
    fn waive(&self, claims: &Claims) -> bool;
}
