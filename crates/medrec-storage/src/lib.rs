//! Patient storage abstraction.
//!
//! The persistent document store is an external collaborator; this crate
//! defines the contract the server codes against: keyed CRUD by
//! `patient_id`, paginated/sorted full-text search with optional
//! field-level projection, and a full scan for the aggregate reports.

pub mod error;
pub mod traits;
pub mod types;

pub use error::StorageError;
pub use traits::PatientStorage;
pub use types::{DEFAULT_PAGE_LIMIT, SearchParams, SearchResult};

/// Convenience result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
