//! The login/logout/refresh protocol over the revocation store.
//!
//! `TokenService` knows nothing but secrets; `AuthService` composes it
//! with the revocation store and implements the stateful protocol:
//!
//! - access verification consults the revocation set before the signature
//! - logout records the presented refresh token until its own expiry
//! - refresh rejects revoked tokens, then mints a brand-new pair

use std::sync::Arc;

use medrec_core::Role;

use crate::AuthResult;
use crate::error::AuthError;
use crate::storage::RevokedTokenStorage;
use crate::token::jwt::{TokenClaims, TokenKind, TokenPair, TokenService};

/// Token protocol orchestration.
#[derive(Clone)]
pub struct AuthService {
    tokens: TokenService,
    revoked: Arc<dyn RevokedTokenStorage>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(tokens: TokenService, revoked: Arc<dyn RevokedTokenStorage>) -> Self {
        Self { tokens, revoked }
    }

    /// The underlying stateless token service.
    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Issues a fresh pair at login.
    pub fn issue_pair(&self, user_id: &str, role: Role) -> AuthResult<TokenPair> {
        self.tokens.issue_pair(user_id, role)
    }

    /// Verifies a bearer access token for the middleware gate.
    ///
    /// The revocation set is consulted for the literal token string before
    /// any signature or expiry check.
    pub async fn check_access(&self, token: &str) -> AuthResult<TokenClaims> {
        if self.revoked.is_revoked(token).await? {
            tracing::debug!("Access denied: token revoked");
            return Err(AuthError::TokenRevoked);
        }
        self.tokens.verify(TokenKind::Access, token)
    }

    /// Revokes a refresh token at logout.
    ///
    /// The token must verify against the refresh secret; its own `exp`
    /// claim becomes the revocation record's expiry.
    pub async fn logout(&self, refresh_token: &str) -> AuthResult<()> {
        let claims = self.tokens.verify(TokenKind::Refresh, refresh_token)?;
        self.revoked
            .revoke(refresh_token, claims.expires_at()?)
            .await?;
        tracing::debug!(user_id = %claims.sub, "Refresh token revoked");
        Ok(())
    }

    /// Exchanges a refresh token for a brand-new access/refresh pair.
    ///
    /// Revocation is checked before signature/expiry, so a revoked token
    /// fails even if it has also expired. The presented token is NOT
    /// revoked on success: old refresh tokens stay valid until their own
    /// expiry. That replay window is the specified rotation-less behavior,
    /// not an oversight in this implementation.
    pub async fn refresh(&self, refresh_token: &str) -> AuthResult<TokenPair> {
        if self.revoked.is_revoked(refresh_token).await? {
            tracing::debug!("Refresh denied: token revoked");
            return Err(AuthError::TokenRevoked);
        }

        let claims = self.tokens.verify(TokenKind::Refresh, refresh_token)?;
        self.tokens.issue_pair(&claims.sub, claims.role)
    }
}
