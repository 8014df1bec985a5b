//! Token service module for signed bearer tokens
//!
//! This module handles:
//! - HS256 access and refresh token issuance
//! - Signature verification followed by issuer, client and expiry checks
//! - Bearer extraction from the `Authorization` header
//! - Startup-registered hooks for private claims and expiry waivers

mod config;
mod hooks;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use hooks::{ClaimsProvider, ExpiryWaiver};
pub use service::TokenService;
