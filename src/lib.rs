//! Personal planner accounts
//!
//! User registration, login and password changes for the personal planner,
//! backed by the `tbl_user` table:
//! - Pattern-based validation of user IDs and passwords
//! - Transactional, parameterized PostgreSQL access through an injected repository
//! - Caller-facing error messages in English or Simplified Chinese

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{AccountError, AuthFailure, Locale, User, UserId};
pub use infrastructure::user::{AccountService, InMemoryUserRepository, PostgresUserRepository};

use std::sync::Arc;

use infrastructure::storage;

/// Connect to PostgreSQL, bring the schema up to date and build the
/// account service on top of the pool.
pub async fn create_account_service(
    config: &AppConfig,
) -> Result<AccountService<PostgresUserRepository>, AccountError> {
    let pool = storage::connect(&config.database).await?;
    storage::run_migrations(&pool).await?;

    Ok(AccountService::new(Arc::new(PostgresUserRepository::new(
        pool,
    ))))
}
