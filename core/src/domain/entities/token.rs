//! Signed bearer token claims.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::identity::{ClientKind, Identity};

/// Claims the token service owns; caller-supplied private claims never overwrite them
pub const RESERVED_CLAIMS: &[&str] = &["iat", "iss", "exp", "client", "token_type"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Refresh,
}

/// The `client` claim. Both fields are optional on the wire so a token with a
/// missing client decodes and is then rejected by the client check instead of
/// failing as a structural error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientClaim {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ClientKind>,
}

impl From<&Identity> for ClientClaim {
    fn from(identity: &Identity) -> Self {
        Self {
            id: Some(identity.id),
            kind: Some(identity.kind),
        }
    }
}

/// JWT claims for access and refresh tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Issued at (unix seconds)
    pub iat: i64,

    /// Issuer; the API base URL
    #[serde(default)]
    pub iss: String,

    /// Expiry (unix seconds)
    pub exp: i64,

    #[serde(default)]
    pub client: ClientClaim,

    /// Present only on refresh tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<TokenType>,

    /// Private claims contributed at issue time
    #[serde(flatten)]
    pub private: Map<String, Value>,
}

impl Claims {
    /// The identity carried in the `client` claim, if it has an id.
    /// A missing kind is treated as an account.
    pub fn identity(&self) -> Option<Identity> {
        self.client.id.map(|id| Identity {
            id,
            kind: self.client.kind.unwrap_or(ClientKind::Account),
        })
    }

    pub fn is_refresh(&self) -> bool {
        self.token_type == Some(TokenType::Refresh)
    }

    /// `now > exp`; a token is still valid during its expiry second
    pub fn is_expired_at(&self, now: i64) -> bool {
        now > self.exp
    }
}
