//! User repository trait

use async_trait::async_trait;

use super::entity::User;
use crate::domain::{DomainError, EntityId};

#[cfg(test)]
use mockall::automock;

/// Sole access path to stored users
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync + std::fmt::Debug {
    /// Persist a new user; fails with `DuplicateEmail` when the email is taken
    async fn create(&self, user: &User) -> Result<(), DomainError>;

    /// Find a user by id, failing with `NotFound` when absent
    async fn find_by_id(&self, id: &EntityId) -> Result<User, DomainError>;

    /// Find a user by email, failing with `NotFound` when absent
    async fn find_by_email(&self, email: &str) -> Result<User, DomainError>;
}
