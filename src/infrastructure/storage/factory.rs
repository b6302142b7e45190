//! Repository factory for runtime backend selection

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::domain::{DomainError, ProductRepository, UserRepository};
use crate::infrastructure::product::{InMemoryProductRepository, PostgresProductRepository};
use crate::infrastructure::user::{InMemoryUserRepository, PostgresUserRepository};

use super::migrations::{Migrator, PostgresMigrator};
use super::postgres::{self, PostgresConfig};

/// Supported storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    /// Process-local maps, lost on restart
    #[default]
    #[serde(alias = "inmemory", alias = "in-memory", alias = "in_memory")]
    Memory,
    /// PostgreSQL tables `users` and `products`
    #[serde(alias = "postgresql", alias = "pg")]
    Postgres,
}

impl std::fmt::Display for StorageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::Postgres => write!(f, "postgres"),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    InMemory,
    Postgres(PostgresConfig),
}

impl StorageConfig {
    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::Memory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// The repositories backing the services
#[derive(Debug, Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub products: Arc<dyn ProductRepository>,
}

impl Repositories {
    /// Fresh, empty in-memory repositories
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            products: Arc::new(InMemoryProductRepository::new()),
        }
    }

    /// Connects to the configured backend, applying pending migrations for PostgreSQL
    pub async fn connect(config: &StorageConfig) -> Result<Self, DomainError> {
        match config {
            StorageConfig::InMemory => {
                info!("Using in-memory storage");
                Ok(Self::in_memory())
            }
            StorageConfig::Postgres(pg_config) => {
                let pool = postgres::connect(pg_config).await?;

                let applied = PostgresMigrator::new(pool.clone()).run().await?;
                info!(applied, "Database schema is up to date");

                Ok(Self {
                    users: Arc::new(PostgresUserRepository::new(pool.clone())),
                    products: Arc::new(PostgresProductRepository::new(pool)),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntityId, PageRequest, Product};

    #[derive(Deserialize)]
    struct Holder {
        backend: StorageType,
    }

    fn parse(raw: &str) -> Result<StorageType, serde_json::Error> {
        serde_json::from_str::<Holder>(&format!(r#"{{"backend":"{}"}}"#, raw)).map(|h| h.backend)
    }

    #[test]
    fn test_storage_type_parsing() {
        assert_eq!(parse("memory").unwrap(), StorageType::Memory);
        assert_eq!(parse("in-memory").unwrap(), StorageType::Memory);
        assert_eq!(parse("postgres").unwrap(), StorageType::Postgres);
        assert_eq!(parse("pg").unwrap(), StorageType::Postgres);
        assert!(parse("sqlite").is_err());
    }

    #[test]
    fn test_storage_type_display() {
        assert_eq!(StorageType::Memory.to_string(), "memory");
        assert_eq!(StorageType::Postgres.to_string(), "postgres");
        assert_eq!(StorageType::default(), StorageType::Memory);
    }

    #[test]
    fn test_storage_config_type() {
        assert_eq!(StorageConfig::InMemory.storage_type(), StorageType::Memory);
        assert_eq!(
            StorageConfig::Postgres(PostgresConfig::default()).storage_type(),
            StorageType::Postgres
        );
    }

    #[tokio::test]
    async fn test_in_memory_repositories_are_empty() {
        let repos = Repositories::connect(&StorageConfig::InMemory).await.unwrap();

        assert!(repos.products.find_all(&PageRequest::default()).await.unwrap().is_empty());
        assert!(repos.users.find_by_id(&EntityId::new()).await.is_err());
    }

    #[tokio::test]
    async fn test_cloned_repositories_share_state() {
        let repos = Repositories::in_memory();
        let clone = repos.clone();

        let product = Product::new("Lamp", 20.0).unwrap();
        repos.products.create(&product).await.unwrap();

        assert_eq!(clone.products.find_by_id(product.id()).await.unwrap(), product);
    }
}
