//! # Infrastructure Layer
//!
//! Concrete implementations of the repository interfaces declared in
//! `ag_core`:
//!
//! - **Cache**: `ExpiringStore` backed by Redis or by an in-process map
//! - **Database**: `AccountRepository` backed by MySQL or by an in-process map
//!
//! ## Features
//!
//! - `mysql`: Enable the MySQL account repository (default)
//! - `redis-cache`: Enable the Redis expiring store (default)

use ag_core::errors::DomainError;

/// Cache module - expiring key/value stores
pub mod cache;

/// Database module - account repositories
pub mod database;

pub use cache::MemoryExpiringStore;
#[cfg(feature = "redis-cache")]
pub use cache::RedisExpiringStore;
pub use database::MemoryAccountRepository;
#[cfg(feature = "mysql")]
pub use database::{DatabasePool, MySqlAccountRepository};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[cfg(feature = "mysql")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[cfg(feature = "redis-cache")]
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Config(message) => DomainError::Internal { message },
            #[allow(unreachable_patterns)]
            other => DomainError::storage(other.to_string()),
        }
    }
}
