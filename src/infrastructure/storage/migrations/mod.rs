//! Database migrations infrastructure

use sqlx::postgres::PgPool;
use tracing::info;

use super::storage_failure;
use crate::domain::AccountError;

/// Applies and reverts [`Migration`]s, tracking them in `_migrations`
#[derive(Debug)]
pub struct PostgresMigrator {
    pool: PgPool,
}

impl PostgresMigrator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the migrations table if it doesn't exist
    async fn ensure_migrations_table(&self) -> Result<(), AccountError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version BIGINT PRIMARY KEY,
                description TEXT NOT NULL,
                installed_on TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| storage_failure("Failed to create migrations table", e))?;

        Ok(())
    }

    async fn is_applied(&self, version: i64) -> Result<bool, AccountError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM _migrations WHERE version = $1)")
            .bind(version)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_failure("Failed to check migration status", e))
    }

    /// Runs a single migration; already applied versions are skipped
    pub async fn run_migration(&self, migration: &Migration) -> Result<(), AccountError> {
        self.ensure_migrations_table().await?;

        if self.is_applied(migration.version).await? {
            return Ok(());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_failure("Failed to begin migration transaction", e))?;

        sqlx::raw_sql(&migration.up)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                storage_failure(format!("Failed to run migration {}", migration.version), e)
            })?;

        sqlx::query("INSERT INTO _migrations (version, description) VALUES ($1, $2)")
            .bind(migration.version)
            .bind(&migration.description)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                storage_failure(
                    format!("Failed to record migration {}", migration.version),
                    e,
                )
            })?;

        tx.commit().await.map_err(|e| {
            storage_failure(format!("Failed to commit migration {}", migration.version), e)
        })?;

        info!(version = migration.version, description = %migration.description, "Applied migration");

        Ok(())
    }

    /// Reverts a single migration; versions that were never applied are skipped
    pub async fn revert_migration(&self, migration: &Migration) -> Result<(), AccountError> {
        self.ensure_migrations_table().await?;

        if !self.is_applied(migration.version).await? {
            return Ok(());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_failure("Failed to begin migration transaction", e))?;

        sqlx::raw_sql(&migration.down)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                storage_failure(
                    format!("Failed to revert migration {}", migration.version),
                    e,
                )
            })?;

        sqlx::query("DELETE FROM _migrations WHERE version = $1")
            .bind(migration.version)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                storage_failure(
                    format!("Failed to remove migration record {}", migration.version),
                    e,
                )
            })?;

        tx.commit().await.map_err(|e| {
            storage_failure(format!("Failed to commit revert {}", migration.version), e)
        })?;

        info!(version = migration.version, "Reverted migration");

        Ok(())
    }

    /// Returns the latest applied migration version
    pub async fn current_version(&self) -> Result<Option<i64>, AccountError> {
        self.ensure_migrations_table().await?;

        sqlx::query_scalar("SELECT MAX(version) FROM _migrations")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_failure("Failed to get migration version", e))
    }
}

/// Represents a database migration
#[derive(Debug, Clone)]
pub struct Migration {
    /// Migration version
    pub version: i64,
    /// Human-readable description
    pub description: String,
    /// SQL to run when applying the migration
    pub up: String,
    /// SQL to run when reverting the migration
    pub down: String,
}

impl Migration {
    pub fn new(
        version: i64,
        description: impl Into<String>,
        up: impl Into<String>,
        down: impl Into<String>,
    ) -> Self {
        Self {
            version,
            description: description.into(),
            up: up.into(),
            down: down.into(),
        }
    }
}

/// Schema of the account store
pub fn account_migrations() -> Vec<Migration> {
    vec![Migration::new(
        1,
        "Create user table",
        r#"
        CREATE TABLE IF NOT EXISTS tbl_user (
            user_id VARCHAR(255) PRIMARY KEY,
            user_pwd VARCHAR(255) NOT NULL,
            registered_at TIMESTAMPTZ NOT NULL
        );
        "#,
        r#"
        DROP TABLE IF EXISTS tbl_user;
        "#,
    )]
}

/// Runs all pending account migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), AccountError> {
    let migrator = PostgresMigrator::new(pool.clone());

    for migration in account_migrations() {
        migrator.run_migration(&migration).await?;
    }

    Ok(())
}

/// Reverts the most recently applied account migration, if any
pub async fn revert_latest(pool: &PgPool) -> Result<Option<i64>, AccountError> {
    let migrator = PostgresMigrator::new(pool.clone());

    let Some(version) = migrator.current_version().await? else {
        return Ok(None);
    };

    match account_migrations().iter().find(|m| m.version == version) {
        Some(migration) => {
            migrator.revert_migration(migration).await?;
            Ok(Some(version))
        }
        None => Ok(None),
    }
}
