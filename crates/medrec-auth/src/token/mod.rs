//! Token issuance, verification, and the logout/refresh protocol.

pub mod jwt;
pub mod service;

pub use jwt::{TokenClaims, TokenConfig, TokenKind, TokenPair, TokenService};
pub use service::AuthService;
