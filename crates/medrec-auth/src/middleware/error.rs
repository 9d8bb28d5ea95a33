//! JSON error responses for authentication failures.

use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AuthError;

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, msg) = error_details(&self);

        let mut headers = HeaderMap::new();
        if status == StatusCode::UNAUTHORIZED
            && let Ok(value) = HeaderValue::from_str(&build_www_authenticate_header(&msg))
        {
            headers.insert(header::WWW_AUTHENTICATE, value);
        }

        (status, headers, Json(json!({ "msg": msg }))).into_response()
    }
}

/// Maps an `AuthError` to its HTTP status and response message.
///
/// Every authentication failure collapses to the same generic 401 body so
/// the caller cannot distinguish revocation from signature or expiry
/// failures. A missing token keeps its own message.
fn error_details(error: &AuthError) -> (StatusCode, String) {
    match error {
        AuthError::Unauthorized { message } => (StatusCode::UNAUTHORIZED, message.clone()),
        AuthError::InvalidToken { .. } | AuthError::TokenExpired | AuthError::TokenRevoked => (
            StatusCode::UNAUTHORIZED,
            "invalid or expired token".to_string(),
        ),
        AuthError::Forbidden { message } => {
            (StatusCode::FORBIDDEN, format!("Forbidden: {message}"))
        }
        AuthError::Storage { .. } | AuthError::Internal { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, "server error".to_string())
        }
    }
}

/// Builds the WWW-Authenticate header value for 401 responses.
fn build_www_authenticate_header(description: &str) -> String {
    let escaped = description.replace('"', "\\\"");
    format!("Bearer realm=\"medrec\", error=\"invalid_token\", error_description=\"{escaped}\"")
}
