//! Keypair credentials
//!
//! - Lookup by key and constant-time secret comparison
//! - Privileged generation (rotation) and fetch for any account
//! - Lazy generation the first time an account views its own profile

mod authenticator;
mod service;

#[cfg(test)]
mod tests;

pub use authenticator::KeypairAuthenticator;
pub use service::KeypairService;
