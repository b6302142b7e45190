//! Storage infrastructure - backend selection, pooling and schema

mod factory;
pub mod migrations;
mod postgres;

pub use factory::{Repositories, StorageConfig, StorageType};
pub use migrations::{catalog_migrations, Migration, Migrator, PostgresMigrator};
pub use postgres::{connect, is_unique_violation, PostgresConfig};
