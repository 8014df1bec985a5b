//! Domain entities representing the resolved client and its persisted credentials.

pub mod account;
pub mod identity;
pub mod keypair;
pub mod rate_counter;
pub mod token;

// Re-export commonly used types
pub use account::{Account, Capability, PublicAccount};
pub use identity::{ClientKind, Identity};
pub use keypair::{Keypair, KEY_SUFFIX_LENGTH, SECRET_LENGTH};
pub use rate_counter::{RateCounter, RateOverride, RateSettings};
pub use token::{Claims, ClientClaim, TokenType, RESERVED_CLAIMS};
