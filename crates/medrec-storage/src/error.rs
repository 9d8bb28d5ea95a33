//! Storage error types.

/// Errors reported by storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No record with the given key exists.
    #[error("Not found: {key}")]
    NotFound {
        /// The key that was not found.
        key: String,
    },

    /// A record with the given key already exists.
    #[error("Already exists: {key}")]
    AlreadyExists {
        /// The conflicting key.
        key: String,
    },

    /// An unexpected backend failure.
    #[error("Storage failure: {message}")]
    Internal {
        /// Description of the failure.
        message: String,
    },
}

impl StorageError {
    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Creates a new `AlreadyExists` error.
    #[must_use]
    pub fn already_exists(key: impl Into<String>) -> Self {
        Self::AlreadyExists { key: key.into() }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if this error means the record is missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::not_found("Patient/P1");
        assert_eq!(err.to_string(), "Not found: Patient/P1");
        assert!(err.is_not_found());

        let err = StorageError::already_exists("User/amrita");
        assert_eq!(err.to_string(), "Already exists: User/amrita");
        assert!(!err.is_not_found());
    }
}
