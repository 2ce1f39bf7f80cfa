//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

#[cfg(test)]
use mockall::automock;

use super::entity::{User, UserId};
use crate::domain::AccountError;

/// Storage access for user accounts.
///
/// Each call runs on its own connection and, for writes, its own
/// transaction. The connection is released on every exit path.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by their ID
    async fn get(&self, id: &UserId) -> Result<Option<User>, AccountError>;

    /// Insert a new user.
    ///
    /// Runs the existence check and the insert in one transaction and fails
    /// with [`AccountError::Conflict`] when the ID is already taken.
    async fn create(&self, user: User) -> Result<User, AccountError>;

    /// Replace the password of a user whose stored password is `old_password`.
    ///
    /// The comparison and the write happen in one transaction. Fails with
    /// `Auth(WrongOldPassword)` when the stored password differs and with
    /// `Auth(AccountNotFound)` when there is no such user.
    async fn update_password(
        &self,
        id: &UserId,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AccountError>;

    /// Check if a user ID exists
    async fn exists(&self, id: &UserId) -> Result<bool, AccountError> {
        Ok(self.get(id).await?.is_some())
    }
}
