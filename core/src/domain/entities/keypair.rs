//! Static key/secret credential bound to one account.

use rand::distributions::{Alphanumeric, DistString};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Random characters appended to the owner id to form the key
pub const KEY_SUFFIX_LENGTH: usize = 24;

pub const SECRET_LENGTH: usize = 32;

const SECRET_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@$%^&*()";

/// One active pair per account; regenerating overwrites the prior pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keypair {
    pub key: String,
    pub secret: String,
    pub owner_account_id: i64,
}

impl Keypair {
    /// Generates a fresh pair for an account
    ///
    /// The key is the owner id followed by random alphanumerics, so keys stay
    /// unique across accounts without a lookup.
    pub fn generate(owner_account_id: i64) -> Self {
        let mut rng = rand::thread_rng();
        let suffix = Alphanumeric.sample_string(&mut rng, KEY_SUFFIX_LENGTH);
        let secret: String = (0..SECRET_LENGTH)
            .map(|_| SECRET_CHARSET[rng.gen_range(0..SECRET_CHARSET.len())] as char)
            .collect();

        Self {
            key: format!("{}{}", owner_account_id, suffix),
            secret,
            owner_account_id,
        }
    }
}
