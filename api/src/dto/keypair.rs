use ag_core::{Keypair, PublicAccount};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeypairResponse {
    pub api_key: String,
    pub api_secret: String,
}

impl From<Keypair> for KeypairResponse {
    fn from(keypair: Keypair) -> Self {
        Self {
            api_key: keypair.key,
            api_secret: keypair.secret,
        }
    }
}

/// Own account view plus the account's keypair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub account: PublicAccount,
    pub api_key: String,
    pub api_secret: String,
}
