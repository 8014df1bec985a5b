//! Shared configuration and wire types for the AuditGate server
//!
//! This crate provides the pieces every other layer depends on:
//! - Configuration types with environment loading
//! - The JSON error body returned by every failing request

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, DatabaseConfig, Environment, JwtConfig, LoggingConfig,
    RateLimitConfig, ServerConfig,
};
pub use types::{ErrorResponse, HealthResponse};
