//! Windowed per-client request quota
//!
//! - Exempts GET requests and free routes
//! - Keys counters by override hook, then resolved identity, then network origin
//! - Counts each inbound request at most once
//! - Lets account managers change an account's quota, resetting its counter

mod client_key;
mod service;

#[cfg(test)]
mod tests;

pub use client_key::{ClientKeyOverride, ANONYMOUS_KEY_PREFIX, SERVICE_KEY_PREFIX};
pub use service::{RateLimiter, RateUsage};
