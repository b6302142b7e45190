//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::user::normalize_email;
use crate::domain::{DomainError, EntityId, User, UserRepository};

#[derive(Debug, Default)]
struct UserTables {
    users: HashMap<EntityId, User>,
    /// Normalized email -> user ID
    email_index: HashMap<String, EntityId>,
}

/// In-memory implementation of UserRepository
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    tables: Arc<RwLock<UserTables>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let email = normalize_email(user.email());

        if tables.email_index.contains_key(&email) {
            return Err(DomainError::duplicate_email(format!(
                "Email '{}' is already registered",
                email
            )));
        }

        if tables.users.contains_key(user.id()) {
            return Err(DomainError::storage(format!(
                "User with ID '{}' already exists",
                user.id()
            )));
        }

        tables.email_index.insert(email, *user.id());
        tables.users.insert(*user.id(), user.clone());

        debug!(user_id = %user.id(), "Stored user");
        Ok(())
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<User, DomainError> {
        let tables = self.tables.read().await;

        tables
            .users
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))
    }

    async fn find_by_email(&self, email: &str) -> Result<User, DomainError> {
        let tables = self.tables.read().await;

        tables
            .email_index
            .get(&normalize_email(email))
            .and_then(|id| tables.users.get(id))
            .cloned()
            .ok_or_else(|| DomainError::not_found("User not found"))
    }
}
