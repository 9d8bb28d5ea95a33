//! Storage traits for auth data.
//!
//! Implementations are provided by backend crates (e.g. `medrec-db-memory`).

pub mod revoked_token;
pub mod user;

pub use revoked_token::RevokedTokenStorage;
pub use user::UserStorage;
