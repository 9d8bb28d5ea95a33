//! The staff user record.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::role::Role;

/// A staff user.
///
/// Users are created at registration and are immutable thereafter. The
/// password hash is never serialized; API responses carry the user
/// "sans password" by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Internal unique identifier (UUID).
    pub id: String,

    /// Unique username used for login.
    pub username: String,

    /// Argon2 password hash. Excluded from every serialized view.
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Assigned role.
    pub role: Role,

    /// When the account was registered.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl User {
    /// Creates a new user with a fresh id and the current timestamp.
    #[must_use]
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>, role: Role) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            username: username.into(),
            password_hash: password_hash.into(),
            role,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}
