//! Product service

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, EntityId, PageRequest, Product, ProductRepository};

/// Product catalog operations over a repository
#[derive(Debug, Clone)]
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    /// Validate and store a new product
    pub async fn create(&self, name: &str, price: f64) -> Result<Product, DomainError> {
        let product = Product::new(name, price)?;
        self.repository.create(&product).await?;

        info!(product_id = %product.id(), "Created product");
        Ok(product)
    }

    pub async fn get(&self, id: &str) -> Result<Product, DomainError> {
        let id = EntityId::parse(id)?;
        self.repository.find_by_id(&id).await
    }

    /// Replace name and price, keeping identity and creation time
    pub async fn update(&self, id: &str, name: &str, price: f64) -> Result<Product, DomainError> {
        let id = EntityId::parse(id)?;

        let mut product = self.repository.find_by_id(&id).await?;
        product.revise(name, price)?;
        self.repository.update(&product).await?;

        info!(product_id = %id, "Updated product");
        Ok(product)
    }

    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let id = EntityId::parse(id)?;
        self.repository.delete(&id).await?;

        info!(product_id = %id, "Deleted product");
        Ok(())
    }

    pub async fn list(&self, page: PageRequest) -> Result<Vec<Product>, DomainError> {
        self.repository.find_all(&page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::MockProductRepository;
    use crate::infrastructure::product::InMemoryProductRepository;

    fn create_service() -> ProductService {
        ProductService::new(Arc::new(InMemoryProductRepository::new()))
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let service = create_service();

        let created = service.create("Desk", 150.0).await.unwrap();
        let fetched = service.get(&created.id().to_string()).await.unwrap();

        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_product() {
        let service = create_service();

        assert!(matches!(
            service.create("", 1.0).await.unwrap_err(),
            DomainError::InvalidProduct { .. }
        ));
        assert!(matches!(
            service.create("Desk", -0.01).await.unwrap_err(),
            DomainError::InvalidProduct { .. }
        ));
        assert!(service.list(PageRequest::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_id() {
        let service = create_service();

        for result in [
            service.get("not-a-uuid").await.map(|_| ()),
            service.update("not-a-uuid", "Desk", 1.0).await.map(|_| ()),
            service.delete("not-a-uuid").await,
        ] {
            assert!(matches!(result, Err(DomainError::InvalidIdentifier { .. })));
        }
    }

    #[tokio::test]
    async fn test_update_keeps_identity_and_creation_time() {
        let service = create_service();
        let created = service.create("Desk", 150.0).await.unwrap();

        let updated = service
            .update(&created.id().to_string(), "Standing Desk", 300.0)
            .await
            .unwrap();

        assert_eq!(updated.id(), created.id());
        assert_eq!(updated.created_at(), created.created_at());
        assert_eq!(updated.name(), "Standing Desk");
        assert_eq!(updated.price(), 300.0);
    }

    #[tokio::test]
    async fn test_update_invalid_leaves_stored_product() {
        let service = create_service();
        let created = service.create("Desk", 150.0).await.unwrap();
        let id = created.id().to_string();

        let err = service.update(&id, "Desk", f64::NAN).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidProduct { .. }));

        assert_eq!(service.get(&id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_update_unknown_is_not_found() {
        let service = create_service();

        let err = service
            .update(&EntityId::new().to_string(), "Desk", 1.0)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        let service = create_service();
        let created = service.create("Desk", 150.0).await.unwrap();
        let id = created.id().to_string();

        tokio_test::assert_ok!(service.delete(&id).await);

        assert!(matches!(
            service.get(&id).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
        assert!(matches!(
            service.delete(&id).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_list_passes_page_through() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_all()
            .withf(|page| {
                page.page == 2 && page.limit == 10 && page.sort == crate::domain::SortOrder::Desc
            })
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let service = ProductService::new(Arc::new(repo));

        let products = service.list(PageRequest::new(2, 10, "desc")).await.unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let mut repo = MockProductRepository::new();
        repo.expect_create()
            .returning(|_| Err(DomainError::storage("disk full")));

        let service = ProductService::new(Arc::new(repo));

        let err = service.create("Desk", 1.0).await.unwrap_err();
        assert!(matches!(err, DomainError::Storage { .. }));
    }
}
