//! Token issuance route
//!
//! Credentials are tried in order: keypair (`api_key`/`api_secret`), refresh
//! token in the `Authorization` header, then `username`/`password`.

pub mod token;

pub use token::generate_token;
