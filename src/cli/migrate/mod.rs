//! Migrate command - applies or reverts the account schema

use clap::Args;
use tracing::info;

use super::{bootstrap, report};
use crate::infrastructure::storage;

/// Arguments for the migrate command
#[derive(Args, Clone)]
pub struct MigrateArgs {
    /// Revert the latest applied migration instead of applying pending ones
    #[arg(long)]
    pub revert: bool,
}

/// Run the migrate command
pub async fn run(args: MigrateArgs) -> anyhow::Result<()> {
    let config = bootstrap()?;
    let locale = config.locale;

    let pool = storage::connect(&config.database)
        .await
        .map_err(|e| report(e, locale))?;

    if args.revert {
        match storage::revert_latest(&pool)
            .await
            .map_err(|e| report(e, locale))?
        {
            Some(version) => println!("Reverted migration {}", version),
            None => println!("No migration to revert"),
        }
    } else {
        storage::run_migrations(&pool)
            .await
            .map_err(|e| report(e, locale))?;

        let version = storage::PostgresMigrator::new(pool.clone())
            .current_version()
            .await
            .map_err(|e| report(e, locale))?;

        info!(?version, "Schema up to date");
        println!("Schema at version {}", version.unwrap_or_default());
    }

    pool.close().await;

    Ok(())
}
