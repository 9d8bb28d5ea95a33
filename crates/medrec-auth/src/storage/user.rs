//! User directory storage trait.

use async_trait::async_trait;
use medrec_core::User;

use crate::AuthResult;

/// Storage interface for the staff user directory.
///
/// Usernames are unique. Users are created at registration and immutable
/// thereafter.
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the username is already taken or the
    /// backend fails. Username conflicts surface to the caller as a
    /// generic server failure, matching the registration contract.
    async fn create(&self, user: &User) -> AuthResult<User>;

    /// Looks up a user by username. Returns `None` if absent.
    async fn find_by_username(&self, username: &str) -> AuthResult<Option<User>>;

    /// Looks up a user by internal id. Returns `None` if absent.
    async fn find_by_id(&self, id: &str) -> AuthResult<Option<User>>;

    /// Returns every user.
    async fn list_all(&self) -> AuthResult<Vec<User>>;
}
