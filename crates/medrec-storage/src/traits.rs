//! The patient storage trait.

use async_trait::async_trait;
use medrec_core::Patient;

use crate::error::StorageError;
use crate::types::{SearchParams, SearchResult};

/// Contract every patient storage backend must implement.
///
/// Records are keyed by the external `patient_id`. Implementations must be
/// thread-safe (`Send + Sync`). There is no optimistic-concurrency token:
/// `update` replaces the stored record wholesale, so concurrent
/// read-modify-write sequences are last-write-wins.
///
/// # Example
///
/// ```ignore
/// use medrec_storage::{PatientStorage, StorageError};
///
/// async fn must_get(store: &dyn PatientStorage, id: &str) -> Result<Patient, StorageError> {
///     store
///         .find_by_patient_id(id)
///         .await?
///         .ok_or_else(|| StorageError::not_found(id))
/// }
/// ```
#[async_trait]
pub trait PatientStorage: Send + Sync {
    /// Creates a new patient record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::AlreadyExists` if the `patient_id` is taken.
    async fn create(&self, patient: &Patient) -> Result<Patient, StorageError>;

    /// Looks up a record by its external `patient_id`.
    ///
    /// Returns `None` for a missing record; errors are reserved for
    /// infrastructure failures.
    async fn find_by_patient_id(&self, patient_id: &str) -> Result<Option<Patient>, StorageError>;

    /// Runs a paginated, sorted, optionally projected text search.
    async fn search(&self, params: &SearchParams) -> Result<SearchResult, StorageError>;

    /// Replaces the stored record wholesale.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no record with the patient's
    /// `patient_id` exists.
    async fn update(&self, patient: &Patient) -> Result<Patient, StorageError>;

    /// Deletes a record by `patient_id`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the record does not exist.
    async fn delete(&self, patient_id: &str) -> Result<(), StorageError>;

    /// Returns every record. The report builders aggregate over this.
    async fn list_all(&self) -> Result<Vec<Patient>, StorageError>;
}
