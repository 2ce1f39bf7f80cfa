//! Storage infrastructure - PostgreSQL pool and schema

pub mod migrations;
mod postgres;

pub use migrations::{account_migrations, revert_latest, run_migrations, Migration, PostgresMigrator};
pub use postgres::{connect, PostgresConfig};

use crate::domain::AccountError;

/// Log a database failure and wrap it as [`AccountError::Storage`]
pub(crate) fn storage_failure(context: impl Into<String>, e: sqlx::Error) -> AccountError {
    let context = context.into();
    tracing::error!(error = %e, "{}", context);
    AccountError::storage(context, e)
}
