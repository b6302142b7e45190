//! In-memory product repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::{DomainError, EntityId, PageRequest, Product, ProductRepository, SortOrder};

#[derive(Debug, Default)]
struct ProductTable {
    /// Product plus insertion sequence, used to break creation-time ties
    rows: HashMap<EntityId, (u64, Product)>,
    next_seq: u64,
}

/// In-memory implementation of ProductRepository
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    table: Arc<RwLock<ProductTable>>,
}

impl InMemoryProductRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: &EntityId) -> DomainError {
    DomainError::not_found(format!("Product '{}' not found", id))
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: &Product) -> Result<(), DomainError> {
        let mut table = self.table.write().await;

        if table.rows.contains_key(product.id()) {
            return Err(DomainError::storage(format!(
                "Product with ID '{}' already exists",
                product.id()
            )));
        }

        let seq = table.next_seq;
        table.next_seq += 1;
        table.rows.insert(*product.id(), (seq, product.clone()));

        debug!(product_id = %product.id(), "Stored product");
        Ok(())
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<Product, DomainError> {
        let table = self.table.read().await;

        table
            .rows
            .get(id)
            .map(|(_, product)| product.clone())
            .ok_or_else(|| not_found(id))
    }

    async fn update(&self, product: &Product) -> Result<(), DomainError> {
        self.find_by_id(product.id()).await?;

        let mut table = self.table.write().await;
        let (_, stored) = table
            .rows
            .get_mut(product.id())
            .ok_or_else(|| not_found(product.id()))?;
        *stored = product.clone();

        debug!(product_id = %product.id(), "Updated product");
        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), DomainError> {
        self.find_by_id(id).await?;

        let mut table = self.table.write().await;
        table.rows.remove(id).ok_or_else(|| not_found(id))?;

        debug!(product_id = %id, "Deleted product");
        Ok(())
    }

    async fn find_all(&self, page: &PageRequest) -> Result<Vec<Product>, DomainError> {
        let table = self.table.read().await;

        let mut rows: Vec<&(u64, Product)> = table.rows.values().collect();
        rows.sort_by(|(seq_a, a), (seq_b, b)| {
            a.created_at()
                .cmp(&b.created_at())
                .then(seq_a.cmp(seq_b))
        });

        if page.sort == SortOrder::Desc {
            rows.reverse();
        }

        let ordered: Vec<Product> = rows
            .into_iter()
            .map(|(_, product)| product.clone())
            .collect();
        Ok(page.window(ordered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    /// Products named "p1".."pN" with strictly increasing creation times
    async fn seeded_repo(count: usize) -> (InMemoryProductRepository, Vec<Product>) {
        let repo = InMemoryProductRepository::new();
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut products = Vec::with_capacity(count);

        for i in 1..=count {
            let product = Product::restore(
                EntityId::new(),
                format!("p{}", i),
                i as f64,
                base + Duration::seconds(i as i64),
            )
            .unwrap();
            repo.create(&product).await.unwrap();
            products.push(product);
        }

        (repo, products)
    }

    fn names(products: &[Product]) -> Vec<String> {
        products.iter().map(|p| p.name().to_string()).collect()
    }

    fn expected(range: std::ops::RangeInclusive<usize>) -> Vec<String> {
        range.map(|i| format!("p{}", i)).collect()
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryProductRepository::new();
        let product = Product::new("Keyboard", 49.0).unwrap();

        repo.create(&product).await.unwrap();

        let found = repo.find_by_id(product.id()).await.unwrap();
        assert_eq!(found, product);
    }

    #[tokio::test]
    async fn test_find_missing_is_not_found() {
        let repo = InMemoryProductRepository::new();

        let err = repo.find_by_id(&EntityId::new()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let repo = InMemoryProductRepository::new();
        let mut product = Product::new("Keyboard", 49.0).unwrap();
        repo.create(&product).await.unwrap();

        product.revise("Mechanical Keyboard", 89.0).unwrap();
        repo.update(&product).await.unwrap();

        let found = repo.find_by_id(product.id()).await.unwrap();
        assert_eq!(found.name(), "Mechanical Keyboard");
        assert_eq!(found.price(), 89.0);
    }

    #[tokio::test]
    async fn test_update_unknown_is_not_found_and_does_not_insert() {
        let repo = InMemoryProductRepository::new();
        let product = Product::new("Ghost", 1.0).unwrap();

        let err = repo.update(&product).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        assert!(repo.find_by_id(product.id()).await.is_err());
        assert!(repo.find_all(&PageRequest::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let (repo, products) = seeded_repo(2).await;

        repo.delete(products[0].id()).await.unwrap();

        assert!(repo.find_by_id(products[0].id()).await.is_err());
        assert!(repo.find_by_id(products[1].id()).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_unknown_is_not_found() {
        let repo = InMemoryProductRepository::new();

        let err = repo.delete(&EntityId::new()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_find_all_orders_by_creation() {
        let (repo, _) = seeded_repo(5).await;

        let asc = repo.find_all(&PageRequest::new(0, 0, "asc")).await.unwrap();
        assert_eq!(names(&asc), expected(1..=5));

        let desc = repo.find_all(&PageRequest::new(0, 0, "desc")).await.unwrap();
        assert_eq!(names(&desc), vec!["p5", "p4", "p3", "p2", "p1"]);
    }

    #[tokio::test]
    async fn test_unknown_sort_is_ascending() {
        let (repo, _) = seeded_repo(5).await;

        let asc = repo.find_all(&PageRequest::new(0, 0, "asc")).await.unwrap();
        let bogus = repo.find_all(&PageRequest::new(0, 0, "bogus")).await.unwrap();
        let empty = repo.find_all(&PageRequest::new(0, 0, "")).await.unwrap();

        assert_eq!(bogus, asc);
        assert_eq!(empty, asc);
    }

    #[tokio::test]
    async fn test_pagination_windows() {
        let (repo, _) = seeded_repo(25).await;

        let page2 = repo.find_all(&PageRequest::new(2, 10, "asc")).await.unwrap();
        assert_eq!(names(&page2), expected(11..=20));

        let page3 = repo.find_all(&PageRequest::new(3, 10, "asc")).await.unwrap();
        assert_eq!(names(&page3), expected(21..=25));

        let page4 = repo.find_all(&PageRequest::new(4, 10, "asc")).await.unwrap();
        assert!(page4.is_empty());
    }

    #[tokio::test]
    async fn test_pagination_descending() {
        let (repo, _) = seeded_repo(25).await;

        let page1 = repo.find_all(&PageRequest::new(1, 10, "desc")).await.unwrap();
        assert_eq!(names(&page1), expected(16..=25).into_iter().rev().collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_zero_page_or_limit_returns_everything() {
        let (repo, _) = seeded_repo(25).await;

        assert_eq!(repo.find_all(&PageRequest::new(0, 10, "asc")).await.unwrap().len(), 25);
        assert_eq!(repo.find_all(&PageRequest::new(2, 0, "asc")).await.unwrap().len(), 25);
    }

    #[tokio::test]
    async fn test_same_timestamp_keeps_insertion_order() {
        let repo = InMemoryProductRepository::new();
        let at = Utc::now();

        for name in ["first", "second", "third"] {
            let product = Product::restore(EntityId::new(), name, 1.0, at).unwrap();
            repo.create(&product).await.unwrap();
        }

        let all = repo.find_all(&PageRequest::default()).await.unwrap();
        assert_eq!(names(&all), vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_concurrent_delete_race() {
        let (repo, products) = seeded_repo(1).await;
        let id = *products[0].id();

        let a = tokio::spawn({
            let repo = repo.clone();
            async move { repo.delete(&id).await }
        });
        let b = tokio::spawn({
            let repo = repo.clone();
            async move { repo.delete(&id).await }
        });

        let results = [a.await.unwrap(), b.await.unwrap()];
        let successes = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);

        for result in results.iter().filter_map(|r| r.as_ref().err()) {
            assert!(matches!(
                result,
                DomainError::NotFound { .. } | DomainError::Storage { .. }
            ));
        }

        assert!(repo.find_all(&PageRequest::default()).await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_update_racing_delete_never_resurrects() {
        for _ in 0..20 {
            let (repo, products) = seeded_repo(1).await;
            let id = *products[0].id();
            let mut revised = products[0].clone();
            revised.revise("renamed", 9.0).unwrap();

            let update = tokio::spawn({
                let repo = repo.clone();
                async move { repo.update(&revised).await }
            });
            let delete = tokio::spawn({
                let repo = repo.clone();
                async move { repo.delete(&id).await }
            });

            let update = update.await.unwrap();
            tokio_test::assert_ok!(delete.await.unwrap());

            if let Err(err) = update {
                assert!(matches!(
                    err,
                    DomainError::NotFound { .. } | DomainError::Storage { .. }
                ));
            }

            assert!(matches!(
                repo.find_by_id(&id).await.unwrap_err(),
                DomainError::NotFound { .. }
            ));
            assert!(repo.find_all(&PageRequest::default()).await.unwrap().is_empty());
        }
    }
}
