//! In-memory revocation set.

use async_trait::async_trait;
use dashmap::DashMap;
use medrec_auth::{AuthResult, storage::RevokedTokenStorage};
use time::OffsetDateTime;

/// Dashmap-backed revocation set keyed by the literal token string.
///
/// The persistent deployment would use a TTL index for expiry-based
/// cleanup; here `cleanup_expired` does the pruning on demand.
#[derive(Debug, Default)]
pub struct InMemoryRevokedTokenStorage {
    revoked: DashMap<String, OffsetDateTime>,
}

impl InMemoryRevokedTokenStorage {
    /// Creates an empty revocation set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RevokedTokenStorage for InMemoryRevokedTokenStorage {
    async fn revoke(&self, token: &str, expires_at: OffsetDateTime) -> AuthResult<()> {
        self.revoked.insert(token.to_string(), expires_at);
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> AuthResult<bool> {
        Ok(self.revoked.contains_key(token))
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now = OffsetDateTime::now_utc();
        let before = self.revoked.len();
        self.revoked.retain(|_, expires_at| *expires_at > now);
        Ok((before - self.revoked.len()) as u64)
    }
}
