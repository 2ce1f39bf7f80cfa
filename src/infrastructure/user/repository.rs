//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::{AccountError, AuthFailure};

/// In-memory implementation of UserRepository
///
/// The existence check and the insert of [`UserRepository::create`], and the
/// old-password comparison and write of [`UserRepository::update_password`],
/// each happen under one write lock.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository with initial users
    pub fn with_users(users: Vec<User>) -> Self {
        let users_map = users
            .into_iter()
            .map(|user| (user.id().as_str().to_string(), user))
            .collect();

        Self {
            users: Arc::new(RwLock::new(users_map)),
        }
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, AccountError> {
        let users = self.users.read().await;
        Ok(users.get(id.as_str()).cloned())
    }

    async fn create(&self, user: User) -> Result<User, AccountError> {
        let mut users = self.users.write().await;
        let id = user.id().as_str().to_string();

        if users.contains_key(&id) {
            return Err(AccountError::conflict(id));
        }

        users.insert(id, user.clone());
        Ok(user)
    }

    async fn update_password(
        &self,
        id: &UserId,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AccountError> {
        let mut users = self.users.write().await;

        match users.get_mut(id.as_str()) {
            Some(user) if user.password() == old_password => {
                user.set_password(new_password);
                Ok(())
            }
            Some(_) => Err(AccountError::auth(AuthFailure::WrongOldPassword)),
            None => Err(AccountError::auth(AuthFailure::AccountNotFound)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user(id: &str) -> User {
        User::new(UserId::new(id).unwrap(), "Passw0rd1234")
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("alice1");

        repo.create(user.clone()).await.unwrap();

        let retrieved = repo.get(user.id()).await.unwrap();
        assert_eq!(retrieved, Some(user));
    }

    #[tokio::test]
    async fn test_get_missing() {
        let repo = InMemoryUserRepository::new();

        let retrieved = repo.get(&UserId::new("ghost").unwrap()).await.unwrap();
        assert!(retrieved.is_none());
    }

    #[tokio::test]
    async fn test_create_duplicate() {
        let repo = InMemoryUserRepository::new();

        repo.create(create_test_user("alice1")).await.unwrap();

        let result = repo.create(create_test_user("alice1")).await;
        assert!(matches!(result, Err(AccountError::Conflict { ref user_id }) if user_id == "alice1"));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_with_users() {
        let repo =
            InMemoryUserRepository::with_users(vec![create_test_user("alice1"), create_test_user("bobby")]);

        assert_eq!(repo.len().await, 2);
        assert!(!repo.is_empty().await);
        assert!(repo.get(&UserId::new("bobby").unwrap()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_password() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("alice1");

        repo.create(user.clone()).await.unwrap();
        repo.update_password(user.id(), "Passw0rd1234", "NewPassw0rd99")
            .await
            .unwrap();

        let retrieved = repo.get(user.id()).await.unwrap().unwrap();
        assert_eq!(retrieved.password(), "NewPassw0rd99");
        assert_eq!(retrieved.registered_at(), user.registered_at());
    }

    #[tokio::test]
    async fn test_update_password_missing_user() {
        let repo = InMemoryUserRepository::new();

        let result = repo
            .update_password(&UserId::new("ghost").unwrap(), "Passw0rd1234", "NewPassw0rd99")
            .await;
        assert!(matches!(
            result,
            Err(AccountError::Auth(AuthFailure::AccountNotFound))
        ));
    }

    #[tokio::test]
    async fn test_update_password_wrong_old_password() {
        let repo = InMemoryUserRepository::with_users(vec![create_test_user("alice1")]);
        let id = UserId::new("alice1").unwrap();

        let result = repo
            .update_password(&id, "NotThePassw0rd", "NewPassw0rd99")
            .await;
        assert!(matches!(
            result,
            Err(AccountError::Auth(AuthFailure::WrongOldPassword))
        ));

        let stored = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.password(), "Passw0rd1234");
    }

    #[tokio::test]
    async fn test_exists() {
        let repo = InMemoryUserRepository::with_users(vec![create_test_user("alice1")]);

        assert!(repo.exists(&UserId::new("alice1").unwrap()).await.unwrap());
        assert!(!repo.exists(&UserId::new("ghost").unwrap()).await.unwrap());
    }
}
