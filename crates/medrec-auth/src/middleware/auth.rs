//! Bearer token authentication extractor.
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, routing::get};
//! use medrec_auth::{AuthState, BearerAuth};
//! use medrec_core::Role;
//!
//! async fn protected(BearerAuth(auth): BearerAuth) -> Result<String, medrec_auth::AuthError> {
//!     auth.require_any(&[Role::Doctor])?;
//!     Ok(format!("hello, {}", auth.user_id))
//! }
//!
//! let app = Router::new()
//!     .route("/protected", get(protected))
//!     .with_state(auth_state);
//! ```

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::AuthError;
use crate::token::AuthService;

use super::types::AuthContext;

// =============================================================================
// Auth State
// =============================================================================

/// State required for bearer token authentication.
///
/// Include this in the application state and expose it to the extractor
/// via `FromRef`.
#[derive(Clone)]
pub struct AuthState {
    /// Token verification and revocation checks.
    pub service: Arc<AuthService>,
}

impl AuthState {
    /// Creates a new auth state.
    pub fn new(service: Arc<AuthService>) -> Self {
        Self { service }
    }
}

// =============================================================================
// Bearer Auth Extractor
// =============================================================================

/// Axum extractor that validates Bearer tokens and yields an [`AuthContext`].
///
/// This extractor:
/// 1. Extracts the `Authorization: Bearer <token>` header
/// 2. Checks the revocation set for the literal token string
/// 3. Verifies signature and expiry against the access secret
/// 4. Attaches the decoded identity
///
/// All three failure modes answer with the same generic 401; the caller
/// cannot tell a revoked token from an expired or forged one. Role gating
/// is the handler's first statement, via [`AuthContext::require_any`].
pub struct BearerAuth(pub AuthContext);

impl<S> FromRequestParts<S> for BearerAuth
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::unauthorized("no token, authorization denied"))?;

        let claims = auth_state.service.check_access(token).await.map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            e
        })?;

        tracing::debug!(user_id = %claims.sub, role = %claims.role, "Token validated");

        Ok(BearerAuth(AuthContext::from(claims)))
    }
}
