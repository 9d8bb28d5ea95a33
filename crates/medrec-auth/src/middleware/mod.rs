//! HTTP middleware for authentication and authorization.
//!
//! - Bearer token extraction and validation ([`BearerAuth`])
//! - Per-route role gating ([`AuthContext::require_any`])
//! - JSON error responses (`IntoResponse` for [`crate::AuthError`])

pub mod auth;
pub mod error;
pub mod types;

pub use auth::{AuthState, BearerAuth};
pub use types::AuthContext;
