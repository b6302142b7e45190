//! Migrate command - manages the PostgreSQL schema

use anyhow::{bail, Context};
use clap::Args;
use tracing::info;

use crate::infrastructure::storage::{self, Migrator, PostgresMigrator, StorageConfig};

#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Revert the most recently applied migration instead
    #[arg(long)]
    pub revert: bool,
}

pub async fn run(args: MigrateArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let storage_config = config
        .database
        .storage_config()
        .context("Invalid database configuration")?;
    let StorageConfig::Postgres(pg_config) = &storage_config else {
        bail!(
            "Migrations require the postgres backend, configured backend is {}",
            storage_config.storage_type()
        );
    };

    let pool = storage::connect(pg_config).await?;
    let migrator = PostgresMigrator::new(pool);

    if args.revert {
        match migrator.revert().await? {
            Some(version) => info!(version, "Reverted migration"),
            None => info!("No migrations to revert"),
        }
    } else {
        let applied = migrator.run().await?;
        info!(applied, version = ?migrator.version().await?, "Migrations complete");
    }

    Ok(())
}
