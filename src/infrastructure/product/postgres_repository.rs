//! PostgreSQL product repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{DomainError, EntityId, PageRequest, Product, ProductRepository};

/// PostgreSQL implementation of ProductRepository
#[derive(Debug, Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn not_found(id: &EntityId) -> DomainError {
    DomainError::not_found(format!("Product '{}' not found", id))
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, product: &Product) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, price, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(product.id().as_uuid())
        .bind(product.name())
        .bind(product.price())
        .bind(product.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create product: {}", e)))?;

        debug!(product_id = %product.id(), "Stored product");
        Ok(())
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<Product, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, price, created_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get product: {}", e)))?;

        match row {
            Some(row) => row_to_product(&row),
            None => Err(not_found(id)),
        }
    }

    async fn update(&self, product: &Product) -> Result<(), DomainError> {
        self.find_by_id(product.id()).await?;

        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, price = $3, created_at = $4
            WHERE id = $1
            "#,
        )
        .bind(product.id().as_uuid())
        .bind(product.name())
        .bind(product.price())
        .bind(product.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update product: {}", e)))?;

        // Deleted between the existence check and the write
        if result.rows_affected() == 0 {
            return Err(not_found(product.id()));
        }

        debug!(product_id = %product.id(), "Updated product");
        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), DomainError> {
        self.find_by_id(id).await?;

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete product: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        debug!(product_id = %id, "Deleted product");
        Ok(())
    }

    async fn find_all(&self, page: &PageRequest) -> Result<Vec<Product>, DomainError> {
        let (sql, window) = list_query(page);

        let mut query = sqlx::query(&sql);
        if let Some((limit, offset)) = window {
            query = query.bind(limit).bind(offset);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list products: {}", e)))?;

        rows.iter().map(row_to_product).collect()
    }
}

/// Listing SQL plus the `(limit, offset)` binds when the request is paginated.
///
/// `id` breaks ties between equal creation times so pages never overlap.
fn list_query(page: &PageRequest) -> (String, Option<(i64, i64)>) {
    let dir = page.sort.as_sql();
    let mut sql = format!(
        "SELECT id, name, price, created_at FROM products ORDER BY created_at {dir}, id {dir}"
    );

    if !page.is_paginated() {
        return (sql, None);
    }

    sql.push_str(" LIMIT $1 OFFSET $2");
    let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
    (sql, Some((i64::from(page.limit), offset)))
}

fn row_to_product(row: &PgRow) -> Result<Product, DomainError> {
    let read_err = |e: sqlx::Error| DomainError::storage(format!("Malformed product row: {}", e));

    let id: Uuid = row.try_get("id").map_err(read_err)?;
    let name: String = row.try_get("name").map_err(read_err)?;
    let price: f64 = row.try_get("price").map_err(read_err)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(read_err)?;

    Product::restore(EntityId::from(id), name, price, created_at)
        .map_err(|e| DomainError::storage(format!("Stored product violates invariants: {}", e)))
}
