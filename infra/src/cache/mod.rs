//! Cache module for expiring key/value storage
//!
//! Refresh tokens and rate counters live here. Redis is the production
//! backend; the in-process store serves tests and single-node development.

pub mod memory_store;
#[cfg(feature = "redis-cache")]
pub mod redis_client;

pub use memory_store::MemoryExpiringStore;
#[cfg(feature = "redis-cache")]
pub use redis_client::RedisExpiringStore;

pub use ag_shared::config::cache::CacheConfig;
