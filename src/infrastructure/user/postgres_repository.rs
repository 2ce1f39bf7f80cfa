//! PostgreSQL user repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::{AccountError, AuthFailure};
use crate::infrastructure::storage::storage_failure;

/// PostgreSQL implementation of UserRepository backed by `tbl_user`
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, AccountError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, user_pwd, registered_at
            FROM tbl_user
            WHERE user_id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_failure("Failed to get user", e))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn create(&self, user: User) -> Result<User, AccountError> {
        // Dropping `tx` without commit rolls the transaction back
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_failure("Failed to begin transaction", e))?;

        let existing: Option<String> =
            sqlx::query_scalar("SELECT user_id FROM tbl_user WHERE user_id = $1")
                .bind(user.id().as_str())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| storage_failure("Failed to check existing user", e))?;

        if existing.is_some() {
            return Err(AccountError::conflict(user.id().as_str()));
        }

        sqlx::query(
            r#"
            INSERT INTO tbl_user (user_id, user_pwd, registered_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.password())
        .bind(user.registered_at())
        .execute(&mut *tx)
        .await
        .map_err(|e| map_insert_error(user.id(), e))?;

        tx.commit()
            .await
            .map_err(|e| storage_failure("Failed to commit user creation", e))?;

        Ok(user)
    }

    async fn update_password(
        &self,
        id: &UserId,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AccountError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_failure("Failed to begin transaction", e))?;

        // The row lock taken by UPDATE makes a concurrent change re-check `user_pwd`
        let result = sqlx::query(
            r#"
            UPDATE tbl_user SET user_pwd = $1
            WHERE user_id = $2 AND user_pwd = $3
            "#,
        )
        .bind(new_password)
        .bind(id.as_str())
        .bind(old_password)
        .execute(&mut *tx)
        .await
        .map_err(|e| storage_failure("Failed to update password", e))?;

        if result.rows_affected() == 0 {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM tbl_user WHERE user_id = $1)")
                    .bind(id.as_str())
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(|e| storage_failure("Failed to check existing user", e))?;

            return Err(password_change_rejected(exists));
        }

        tx.commit()
            .await
            .map_err(|e| storage_failure("Failed to commit password update", e))?;

        Ok(())
    }
}

/// A concurrent registration may commit between the existence check and the
/// insert; the primary key then reports a unique violation.
fn map_insert_error(user_id: &UserId, e: sqlx::Error) -> AccountError {
    if is_unique_violation(&e) {
        AccountError::conflict(user_id.as_str())
    } else {
        storage_failure("Failed to create user", e)
    }
}

fn password_change_rejected(account_exists: bool) -> AccountError {
    if account_exists {
        AccountError::auth(AuthFailure::WrongOldPassword)
    } else {
        AccountError::auth(AuthFailure::AccountNotFound)
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, AccountError> {
    let id: String = row
        .try_get("user_id")
        .map_err(|e| storage_failure("Failed to read user_id column", e))?;
    let password: String = row
        .try_get("user_pwd")
        .map_err(|e| storage_failure("Failed to read user_pwd column", e))?;
    let registered_at: DateTime<Utc> = row
        .try_get("registered_at")
        .map_err(|e| storage_failure("Failed to read registered_at column", e))?;

    user_from_columns(id, password, registered_at)
}

fn user_from_columns(
    id: String,
    password: String,
    registered_at: DateTime<Utc>,
) -> Result<User, AccountError> {
    let user_id = UserId::new(&id).map_err(|e| {
        tracing::error!(user_id = %id, error = %e, "Invalid user ID in database");
        AccountError::storage(format!("Invalid user ID in database: '{}'", id), e)
    })?;

    Ok(User::restore(user_id, password, registered_at))
}
