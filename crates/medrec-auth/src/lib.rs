//! Authentication and authorization for the medrec server.
//!
//! This crate provides:
//!
//! - A stateless token service issuing signed access/refresh token pairs
//!   (HS256, one secret per token kind)
//! - A revocation store interface consulted before every verification
//! - Argon2 password hashing for the user directory
//! - An Axum bearer-token extractor with per-route role gating

pub mod error;
pub mod middleware;
pub mod password;
pub mod storage;
pub mod token;

pub use error::AuthError;
pub use middleware::{AuthContext, AuthState, BearerAuth};
pub use token::{AuthService, TokenClaims, TokenConfig, TokenKind, TokenPair, TokenService};

/// Convenience result alias for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;
