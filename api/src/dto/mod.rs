//! Request and response bodies of the API routes

pub mod error;
pub mod keypair;
pub mod rate_limit;

pub use error::{ErrorResponse, ErrorResponseExt};
pub use keypair::{KeypairResponse, ProfileResponse};
pub use rate_limit::RateOverrideRequest;
