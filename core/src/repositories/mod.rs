//! Collaborator interfaces the credential layer consumes.

pub mod account;
pub mod store;

pub use account::AccountRepository;
pub use store::ExpiringStore;

#[cfg(test)]
pub use account::MockAccountRepository;
#[cfg(test)]
pub use store::MockExpiringStore;
