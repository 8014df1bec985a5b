//! Account entity as seen by the credential layer.

use serde::{Deserialize, Serialize};

/// Permissions the credential layer checks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Manage other accounts: rotate their keypairs, change their quotas
    ManageAccounts,
    /// Submit audits
    SubmitAudits,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ManageAccounts => "manage_accounts",
            Capability::SubmitAudits => "submit_audits",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "manage_accounts" => Some(Capability::ManageAccounts),
            "submit_audits" => Some(Capability::SubmitAudits),
            _ => None,
        }
    }
}

/// A stored account, including the fields that must never leave the credential layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub login: String,
    pub password_hash: String,
    pub display_name: String,
    pub email: String,
    pub activation_key: Option<String>,
    pub capabilities: Vec<Capability>,
}

impl Account {
    pub fn new(id: i64, login: impl Into<String>, password_hash: impl Into<String>) -> Self {
        let login = login.into();
        Self {
            id,
            display_name: login.clone(),
            login,
            password_hash: password_hash.into(),
            email: String::new(),
            activation_key: None,
            capabilities: Vec::new(),
        }
    }

    pub fn with_capability(mut self, capability: Capability) -> Self {
        if !self.capabilities.contains(&capability) {
            self.capabilities.push(capability);
        }
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Strip the password hash, activation key and capability cache
    pub fn to_public(&self) -> PublicAccount {
        PublicAccount {
            id: self.id,
            login: self.login.clone(),
            display_name: self.display_name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Account view safe to attach to a request or return to a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicAccount {
    pub id: i64,
    pub login: String,
    pub display_name: String,
    pub email: String,
}
