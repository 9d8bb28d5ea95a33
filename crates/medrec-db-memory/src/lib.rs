//! In-memory storage backends.
//!
//! Dashmap-backed implementations of the patient store, the user
//! directory, and the revocation set. The process owns all state; nothing
//! survives a restart. Suitable for tests and single-node deployments.

pub mod patients;
pub mod revoked_tokens;
pub mod users;

pub use patients::InMemoryPatientStorage;
pub use revoked_tokens::InMemoryRevokedTokenStorage;
pub use users::InMemoryUserStorage;
