//! In-memory user directory.

use async_trait::async_trait;
use dashmap::DashMap;
use medrec_auth::{AuthError, AuthResult, storage::UserStorage};
use medrec_core::User;

/// Dashmap-backed user directory keyed by the unique username.
#[derive(Debug, Default)]
pub struct InMemoryUserStorage {
    by_username: DashMap<String, User>,
}

impl InMemoryUserStorage {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStorage for InMemoryUserStorage {
    async fn create(&self, user: &User) -> AuthResult<User> {
        use dashmap::mapref::entry::Entry;

        match self.by_username.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(AuthError::storage(format!(
                "username already exists: {}",
                user.username
            ))),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(user.clone())
            }
        }
    }

    async fn find_by_username(&self, username: &str) -> AuthResult<Option<User>> {
        Ok(self.by_username.get(username).map(|r| r.value().clone()))
    }

    async fn find_by_id(&self, id: &str) -> AuthResult<Option<User>> {
        Ok(self
            .by_username
            .iter()
            .find(|r| r.value().id == id)
            .map(|r| r.value().clone()))
    }

    async fn list_all(&self) -> AuthResult<Vec<User>> {
        Ok(self.by_username.iter().map(|r| r.value().clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use medrec_core::Role;

    use super::*;

    #[tokio::test]
    async fn test_create_and_lookup() {
        let store = InMemoryUserStorage::new();
        let user = User::new("amrita", "hash", Role::Doctor);
        store.create(&user).await.unwrap();

        let found = store.find_by_username("amrita").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);

        let found = store.find_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(found.username, "amrita");

        assert!(store.find_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_a_storage_error() {
        let store = InMemoryUserStorage::new();
        store
            .create(&User::new("amrita", "hash", Role::Doctor))
            .await
            .unwrap();

        let err = store
            .create(&User::new("amrita", "hash2", Role::Nurse))
            .await
            .unwrap_err();
        assert!(err.is_server_error());
    }
}
