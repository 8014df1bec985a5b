//! Wire types shared between the core and API layers

pub mod response;

pub use response::{ErrorResponse, HealthResponse};
