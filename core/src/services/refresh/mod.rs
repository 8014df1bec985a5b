//! Refresh token flow
//!
//! Account identities keep exactly one stored refresh token, reused until it
//! expires. Service identities get a fresh, unstored token on every issuance.

mod authenticator;
mod service;


pub use authenticator::RefreshTokenAuthenticator;
pub use service::{RefreshTokenService, REFRESH_TOKEN_KEY_PREFIX};
