//! Database module - account repository implementations
//!
//! - `memory`: in-process repository for tests and local development
//! - `mysql`: SQLx-backed repository (feature `mysql`)

#[cfg(feature = "mysql")]
pub mod connection;
pub mod memory;
#[cfg(feature = "mysql")]
pub mod mysql;

#[cfg(feature = "mysql")]
pub use connection::DatabasePool;
pub use memory::MemoryAccountRepository;
#[cfg(feature = "mysql")]
pub use mysql::MySqlAccountRepository;
