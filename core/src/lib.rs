//! # AuditGate Core
//!
//! Client identity and admission control for the audit API.
//! This crate contains the domain entities, the token service, the credential
//! authenticator chain, the refresh token flow, the rate limiter, the request
//! gate, and the repository interfaces they consume.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    Account, Capability, Claims, ClientKind, Identity, Keypair, PublicAccount, RateCounter,
    RateOverride, RateSettings,
};
pub use domain::value_objects::{
    AccessGrant, CredentialRequest, CredentialScheme, InboundRequest, QuotaSnapshot,
    RateDecision, RequestMeter,
};
pub use errors::{AuthError, DomainError, DomainResult, RateLimitError, TokenError};
pub use repositories::{AccountRepository, ExpiringStore};
pub use services::{
    AccountPermissionChecker, AuthService, Authenticator, ClaimsProvider, ClientKeyOverride,
    CredentialChain, ExpiryWaiver, GateOutcome,
    KeypairAuthenticator, KeypairService, PasswordAuthenticator, PermissionChecker, RateLimiter,
    RateUsage, RefreshTokenAuthenticator, RefreshTokenService, RequestGate, TokenService,
    TokenServiceConfig,
};
