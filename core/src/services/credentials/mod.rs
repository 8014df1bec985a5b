//! Credential authenticator chain
//!
//! Schemes are registered in priority order at startup. The chain stops at the
//! first scheme that resolves an identity; the username/password fallback runs
//! only when none did.

mod authenticator;
mod chain;
mod password;


pub use authenticator::Authenticator;
pub use chain::{ChainResolution, CredentialChain};
pub use password::PasswordAuthenticator;
