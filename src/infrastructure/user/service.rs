//! Account service for registration, login and password changes

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::user::{
    validate_new_password, validate_password, User, UserId, UserRepository,
};
use crate::domain::{AccountError, AuthFailure};

/// Account operations over an injected [`UserRepository`]
#[derive(Debug)]
pub struct AccountService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> AccountService<R> {
    /// Create a new account service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Register a new user.
    ///
    /// The user ID is validated first, then the password against its
    /// confirmation. The first violated rule is reported.
    #[instrument(skip(self, password, password_confirm))]
    pub async fn register(
        &self,
        user_id: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<User, AccountError> {
        let id = UserId::new(user_id)?;
        validate_password(password, password_confirm)?;

        let user = self.repository.create(User::new(id, password)).await?;

        info!(user_id = %user.id(), "User registered");
        Ok(user)
    }

    /// Log a user in.
    ///
    /// The stored password is compared as plain text; there is no hashing
    /// in this account store.
    #[instrument(skip(self, password))]
    pub async fn login(&self, user_id: &str, password: &str) -> Result<User, AccountError> {
        // An ID that fails validation can never have been registered
        let Ok(id) = UserId::new(user_id) else {
            return Err(AccountError::auth(AuthFailure::AccountNotFound));
        };

        let user = self
            .repository
            .get(&id)
            .await?
            .ok_or(AccountError::auth(AuthFailure::AccountNotFound))?;

        if user.password() != password {
            warn!(user_id = %id, "Login rejected: bad password");
            return Err(AccountError::auth(AuthFailure::BadPassword));
        }

        info!(user_id = %id, "User logged in");
        Ok(user)
    }

    /// Look up an account without checking its password.
    ///
    /// Returns `None` for an ID that fails validation.
    #[instrument(skip(self))]
    pub async fn get(&self, user_id: &str) -> Result<Option<User>, AccountError> {
        match UserId::new(user_id) {
            Ok(id) => self.repository.get(&id).await,
            Err(_) => Ok(None),
        }
    }

    /// Change the password of a logged-in user.
    ///
    /// `old_password` is checked against the password currently stored for
    /// the user before the new password is validated. The write only succeeds
    /// while the stored password still equals `old_password`, so of two
    /// concurrent changes from the same old password exactly one wins. On
    /// success `user` is updated to carry the new password.
    #[instrument(skip_all, fields(user_id = %user.id()))]
    pub async fn change_password(
        &self,
        user: &mut User,
        old_password: &str,
        new_password: &str,
        new_password_confirm: &str,
    ) -> Result<(), AccountError> {
        let stored = self
            .repository
            .get(user.id())
            .await?
            .ok_or(AccountError::auth(AuthFailure::AccountNotFound))?;

        if stored.password() != old_password {
            warn!("Password change rejected: old password mismatch");
            return Err(AccountError::auth(AuthFailure::WrongOldPassword));
        }

        validate_new_password(new_password, new_password_confirm)?;

        self.repository
            .update_password(user.id(), old_password, new_password)
            .await
            .inspect_err(|e| {
                if matches!(e, AccountError::Auth(AuthFailure::WrongOldPassword)) {
                    warn!("Password change rejected: password changed concurrently");
                }
            })?;
        user.set_password(new_password);

        info!("Password changed");
        Ok(())
    }
}
