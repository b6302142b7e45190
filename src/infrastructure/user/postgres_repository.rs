//! PostgreSQL user repository implementation

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::debug;
use uuid::Uuid;

use crate::domain::user::normalize_email;
use crate::domain::{DomainError, EntityId, User, UserRepository};
use crate::infrastructure::storage::is_unique_violation;

/// Unique constraint on `users.email`, created by the first migration
const EMAIL_CONSTRAINT: &str = "users_email_key";

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.name())
        .bind(normalize_email(user.email()))
        .bind(user.password_hash())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, EMAIL_CONSTRAINT) {
                DomainError::duplicate_email(format!(
                    "Email '{}' is already registered",
                    user.email()
                ))
            } else {
                DomainError::storage(format!("Failed to create user: {}", e))
            }
        })?;

        debug!(user_id = %user.id(), "Stored user");
        Ok(())
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<User, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password_hash
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        match row {
            Some(row) => row_to_user(&row),
            None => Err(DomainError::not_found(format!("User '{}' not found", id))),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<User, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user by email: {}", e)))?;

        match row {
            Some(row) => row_to_user(&row),
            None => Err(DomainError::not_found("User not found")),
        }
    }
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let read_err = |e: sqlx::Error| DomainError::storage(format!("Malformed user row: {}", e));

    let id: Uuid = row.try_get("id").map_err(read_err)?;
    let name: String = row.try_get("name").map_err(read_err)?;
    let email: String = row.try_get("email").map_err(read_err)?;
    let password_hash: String = row.try_get("password_hash").map_err(read_err)?;

    Ok(User::restore(EntityId::from(id), name, email, password_hash))
}
