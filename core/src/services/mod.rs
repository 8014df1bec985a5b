//! Business services: tokens, credential schemes and admission control.

pub mod auth;
pub mod credentials;
pub mod gate;
pub mod keypair;
pub mod permission;
pub mod rate_limit;
pub mod refresh;
pub mod token;

// Re-export commonly used types
pub use auth::AuthService;
pub use credentials::{Authenticator, ChainResolution, CredentialChain, PasswordAuthenticator};
pub use gate::{GateOutcome, RequestGate};
pub use keypair::{KeypairAuthenticator, KeypairService};
pub use permission::{AccountPermissionChecker, PermissionChecker};
pub use rate_limit::{ClientKeyOverride, RateLimiter, RateUsage};
pub use refresh::{RefreshTokenAuthenticator, RefreshTokenService};
pub use token::{ClaimsProvider, ExpiryWaiver, TokenService, TokenServiceConfig};
