pub mod auth;
pub mod gate;

pub use auth::AuthContext;
pub use gate::{RequestGateLayer, RATE_LIMIT, RATE_LIMIT_REMAINING, RATE_LIMIT_RESET};
