//! Product repository trait

use async_trait::async_trait;

use super::entity::Product;
use super::pagination::PageRequest;
use crate::domain::{DomainError, EntityId};

#[cfg(test)]
use mockall::automock;

/// Sole access path to stored products
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync + std::fmt::Debug {
    /// Persist a new product as-is
    async fn create(&self, product: &Product) -> Result<(), DomainError>;

    /// Find a product by id, failing with `NotFound` when absent
    async fn find_by_id(&self, id: &EntityId) -> Result<Product, DomainError>;

    /// Replace an existing product; never inserts
    async fn update(&self, product: &Product) -> Result<(), DomainError>;

    /// Remove an existing product
    async fn delete(&self, id: &EntityId) -> Result<(), DomainError>;

    /// List products ordered by creation time, windowed by `page`
    async fn find_all(&self, page: &PageRequest) -> Result<Vec<Product>, DomainError>;
}
