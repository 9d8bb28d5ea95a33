//! Signed, stateless tokens.
//!
//! The server issues two token kinds from a `{user_id, role}` payload: a
//! short-lived access token and a longer-lived refresh token, each signed
//! HS256 with its own secret. Verification is purely functional given the
//! secret configuration; revocation lives elsewhere.

use std::fmt;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use medrec_core::Role;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::error::AuthError;

// =============================================================================
// Token Kind
// =============================================================================

/// The two kinds of token the service issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Short-lived credential authorizing API calls.
    Access,
    /// Longer-lived credential used solely to mint new pairs.
    Refresh,
}

impl TokenKind {
    /// Returns the kind name for logging.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Claims
// =============================================================================

/// Claims carried by both token kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the user's internal id.
    pub sub: String,

    /// The user's role at issuance time.
    pub role: Role,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

impl TokenClaims {
    /// Returns the expiry as an `OffsetDateTime`.
    ///
    /// # Errors
    ///
    /// Fails if the `exp` claim is outside the representable range.
    pub fn expires_at(&self) -> Result<OffsetDateTime, AuthError> {
        OffsetDateTime::from_unix_timestamp(self.exp)
            .map_err(|e| AuthError::invalid_token(format!("exp out of range: {e}")))
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Secret and lifetime configuration for both token kinds.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HMAC secret for access tokens.
    pub access_secret: String,

    /// HMAC secret for refresh tokens. Must differ from `access_secret`.
    pub refresh_secret: String,

    /// Access token lifetime.
    pub access_ttl: Duration,

    /// Refresh token lifetime.
    pub refresh_ttl: Duration,
}

impl TokenConfig {
    /// Default access token lifetime (24 hours).
    pub const DEFAULT_ACCESS_TTL: Duration = Duration::hours(24);

    /// Default refresh token lifetime (7 days).
    pub const DEFAULT_REFRESH_TTL: Duration = Duration::days(7);

    /// Creates a config with the default lifetimes.
    #[must_use]
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            access_ttl: Self::DEFAULT_ACCESS_TTL,
            refresh_ttl: Self::DEFAULT_REFRESH_TTL,
        }
    }
}

// =============================================================================
// Token Pair
// =============================================================================

/// A freshly minted access/refresh token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

// =============================================================================
// Token Service
// =============================================================================

/// Issues and verifies signed tokens. No side effects.
#[derive(Debug, Clone)]
pub struct TokenService {
    config: TokenConfig,
}

impl TokenService {
    /// Creates a new token service.
    #[must_use]
    pub fn new(config: TokenConfig) -> Self {
        Self { config }
    }

    fn secret(&self, kind: TokenKind) -> &[u8] {
        match kind {
            TokenKind::Access => self.config.access_secret.as_bytes(),
            TokenKind::Refresh => self.config.refresh_secret.as_bytes(),
        }
    }

    fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.config.access_ttl,
            TokenKind::Refresh => self.config.refresh_ttl,
        }
    }

    /// Issues a single token of the given kind.
    pub fn issue(&self, kind: TokenKind, user_id: &str, role: Role) -> Result<String, AuthError> {
        let now = OffsetDateTime::now_utc();
        let claims = TokenClaims {
            sub: user_id.to_string(),
            role,
            iat: now.unix_timestamp(),
            exp: (now + self.ttl(kind)).unix_timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret(kind)),
        )
        .map_err(|e| AuthError::internal(format!("token encoding failed: {e}")))
    }

    /// Issues a fresh access/refresh pair for the same payload.
    pub fn issue_pair(&self, user_id: &str, role: Role) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access_token: self.issue(TokenKind::Access, user_id, role)?,
            refresh_token: self.issue(TokenKind::Refresh, user_id, role)?,
        })
    }

    /// Verifies a token against the secret for `kind` and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenExpired` for an expired token and
    /// `AuthError::InvalidToken` for everything else (bad signature,
    /// malformed, wrong secret).
    pub fn verify(&self, kind: TokenKind, token: &str) -> Result<TokenClaims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret(kind)),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::invalid_token(e.to_string()),
        })
    }
}
