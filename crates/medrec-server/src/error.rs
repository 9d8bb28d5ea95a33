//! The centralized error-to-response mapping.
//!
//! Every handler funnels failures through [`ApiError`]; there are no
//! inline status codes in handler bodies. Error bodies are
//! `{"msg": string}`, except validation failures which carry
//! `{"errors": [{field, message}, ...]}` with every violated field.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use medrec_auth::AuthError;
use medrec_storage::StorageError;
use serde_json::json;

use crate::validation::FieldError;

/// The API-level error taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or out-of-range input; reports every violated field.
    #[error("validation failed")]
    Validation {
        /// One entry per violated field.
        errors: Vec<FieldError>,
    },

    /// A malformed request outside field validation (e.g. missing body
    /// members).
    #[error("{message}")]
    BadRequest { message: String },

    /// No matching patient, appointment, or user.
    #[error("{message}")]
    NotFound { message: String },

    /// Authentication or authorization failure; delegates to the auth
    /// crate's response mapping so 401/403 bodies stay uniform.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Unexpected store or infrastructure failure.
    #[error("{message}")]
    Internal { message: String },
}

impl ApiError {
    /// Creates a `Validation` error.
    #[must_use]
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation { errors }
    }

    /// Creates a `BadRequest` error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Creates a `NotFound` error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates an `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            // Only the patient store surfaces StorageError to handlers.
            StorageError::NotFound { .. } => Self::not_found("Patient not found"),
            StorageError::AlreadyExists { key } => {
                Self::internal(format!("duplicate record: {key}"))
            }
            StorageError::Internal { message } => Self::internal(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation { errors } => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            Self::BadRequest { message } => {
                (StatusCode::BAD_REQUEST, Json(json!({ "msg": message }))).into_response()
            }
            Self::NotFound { message } => {
                (StatusCode::NOT_FOUND, Json(json!({ "msg": message }))).into_response()
            }
            Self::Auth(err) => err.into_response(),
            Self::Internal { message } => {
                tracing::error!(error = %message, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "msg": "server error" })),
                )
                    .into_response()
            }
        }
    }
}
