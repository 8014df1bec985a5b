//! Credential exchange: resolve an identity through the chain, then issue tokens.

mod service;


pub use service::AuthService;
