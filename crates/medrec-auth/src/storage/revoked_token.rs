//! Revoked token storage trait.
//!
//! When a refresh token is revoked at logout it is recorded here, keyed by
//! the literal token string, together with the token's own expiry claim.
//! The record only needs to outlive the token: once the token would have
//! expired anyway there is nothing left to protect, so expired records may
//! be pruned at any time.
//!
//! Lookups run on every token verification and must be fast.

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::AuthResult;

/// Storage interface for the revocation set.
///
/// # Example Implementation
///
/// ```ignore
/// use medrec_auth::storage::RevokedTokenStorage;
/// use medrec_auth::AuthResult;
/// use time::OffsetDateTime;
///
/// struct MemoryRevocations {
///     revoked: std::sync::RwLock<std::collections::HashMap<String, OffsetDateTime>>,
/// }
///
/// #[async_trait::async_trait]
/// impl RevokedTokenStorage for MemoryRevocations {
///     async fn revoke(&self, token: &str, expires_at: OffsetDateTime) -> AuthResult<()> {
///         self.revoked.write().unwrap().insert(token.to_string(), expires_at);
///         Ok(())
///     }
///     // ... other methods
/// }
/// ```
#[async_trait]
pub trait RevokedTokenStorage: Send + Sync {
    /// Records a token as revoked until (at least) `expires_at`.
    ///
    /// Revoking an already-revoked token succeeds without error.
    async fn revoke(&self, token: &str, expires_at: OffsetDateTime) -> AuthResult<()>;

    /// Returns `true` if the literal token string has been revoked.
    async fn is_revoked(&self, token: &str) -> AuthResult<bool>;

    /// Prunes revocation records whose expiry has passed.
    ///
    /// Returns the number of records removed.
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
