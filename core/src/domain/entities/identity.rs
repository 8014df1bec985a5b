//! The client a request is attributed to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of client behind an identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientKind {
    /// A human account
    Account,
    /// A service or audit-worker client
    Service,
}

impl ClientKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientKind::Account => "account",
            ClientKind::Service => "service",
        }
    }
}

/// Resolved once per request and never mutated afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ClientKind,
}

impl Identity {
    pub fn account(id: i64) -> Self {
        Self {
            id,
            kind: ClientKind::Account,
        }
    }

    pub fn service(id: i64) -> Self {
        Self {
            id,
            kind: ClientKind::Service,
        }
    }

    pub fn is_account(&self) -> bool {
        self.kind == ClientKind::Account
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.as_str(), self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_wire_shape() {
        let json = serde_json::to_value(Identity::service(12)).unwrap();
        assert_eq!(json, serde_json::json!({"id": 12, "type": "service"}));
    }

    #[test]
    fn test_display() {
        assert_eq!(Identity::account(7).to_string(), "account:7");
    }
}
