//! Authenticated request context.

use medrec_core::Role;

use crate::error::AuthError;
use crate::token::TokenClaims;

/// The decoded identity attached to an authenticated request.
///
/// Handlers receive this explicitly (as an extractor value), never through
/// a mutable request-global.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The authenticated user's internal id.
    pub user_id: String,

    /// The role carried by the token.
    pub role: Role,
}

impl AuthContext {
    /// Enforces a role allowlist.
    ///
    /// An empty allowlist admits any authenticated identity; otherwise the
    /// context's role must be in the list.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Forbidden` when the role is not allowed.
    pub fn require_any(&self, allowed: &[Role]) -> Result<(), AuthError> {
        if allowed.is_empty() || allowed.contains(&self.role) {
            return Ok(());
        }
        tracing::debug!(
            user_id = %self.user_id,
            role = %self.role,
            ?allowed,
            "Access denied: insufficient role"
        );
        Err(AuthError::forbidden("insufficient role"))
    }
}

impl From<TokenClaims> for AuthContext {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.sub,
            role: claims.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(role: Role) -> AuthContext {
        AuthContext {
            user_id: "user-1".to_string(),
            role,
        }
    }

    #[test]
    fn test_empty_allowlist_admits_everyone() {
        for role in Role::ALL {
            assert!(ctx(*role).require_any(&[]).is_ok());
        }
    }

    #[test]
    fn test_allowlist_is_enforced() {
        assert!(ctx(Role::Doctor).require_any(&[Role::Doctor]).is_ok());
        assert!(
            ctx(Role::Receptionist)
                .require_any(&[Role::Doctor, Role::Receptionist])
                .is_ok()
        );

        let err = ctx(Role::Nurse).require_any(&[Role::Admin]).unwrap_err();
        assert!(err.is_authorization_error());
    }
}
