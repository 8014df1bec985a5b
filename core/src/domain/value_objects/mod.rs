//! Value objects representing immutable per-request concepts.

pub mod access_grant;
pub mod credentials;
pub mod rate_decision;
pub mod request;

// Re-export commonly used types
pub use access_grant::AccessGrant;
pub use credentials::{CredentialRequest, CredentialScheme};
pub use rate_decision::{QuotaSnapshot, RateDecision};
pub use request::{InboundRequest, RequestMeter};
