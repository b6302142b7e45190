//! Command-line entry points
//!
//! - `serve`: run the HTTP API (default)
//! - `migrate`: apply or revert PostgreSQL schema migrations

pub mod migrate;
pub mod serve;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Catalog API - products and users behind bearer tokens
#[derive(Debug, Parser)]
#[command(name = "catalog-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Apply pending database migrations
    Migrate(migrate::MigrateArgs),
}

/// Load `.env`, layered configuration and the global subscriber
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init_logging(&config.logging)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::try_parse_from(["catalog-api"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_migrate_revert_flag() {
        let cli = Cli::try_parse_from(["catalog-api", "migrate", "--revert"]).unwrap();
        match cli.command {
            Some(Command::Migrate(args)) => assert!(args.revert),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_command_fails() {
        assert!(Cli::try_parse_from(["catalog-api", "ui"]).is_err());
    }
}
