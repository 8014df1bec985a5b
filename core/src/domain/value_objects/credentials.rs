//! Credentials presented to the token issuance route.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Which scheme resolved an identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialScheme {
    Keypair,
    RefreshToken,
    Password,
}

impl CredentialScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialScheme::Keypair => "keypair",
            CredentialScheme::RefreshToken => "refresh_token",
            CredentialScheme::Password => "password",
        }
    }
}

/// Everything an authenticator may look at
///
/// Body fields arrive as JSON or form data. Fields no built-in scheme uses are
/// kept in `extra` for authenticators registered later.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CredentialRequest {
    /// Raw `Authorization` header value
    #[serde(skip)]
    pub authorization: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub api_secret: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CredentialRequest {
    pub fn with_authorization(mut self, header: impl Into<String>) -> Self {
        self.authorization = Some(header.into());
        self
    }

    pub fn password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            ..Default::default()
        }
    }

    pub fn keypair(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            api_secret: Some(api_secret.into()),
            ..Default::default()
        }
    }
}
