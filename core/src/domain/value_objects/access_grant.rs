//! Response of a successful credential exchange.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Identity, PublicAccount};

/// Tokens issued for a resolved identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessGrant {
    pub access_token: String,

    /// Absent when the identity was resolved from a refresh token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    pub client: Identity,

    /// Stripped account view when the client is an account
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<PublicAccount>,
}
