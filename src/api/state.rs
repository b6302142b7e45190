//! Application state shared by the handlers

use std::sync::Arc;

use crate::domain::PasswordHasher;
use crate::infrastructure::auth::TokenIssuer;
use crate::infrastructure::product::ProductService;
use crate::infrastructure::storage::Repositories;
use crate::infrastructure::user::UserService;

/// Services and the token verifier, cloned into every request
#[derive(Debug, Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub product_service: ProductService,
    pub tokens: Arc<dyn TokenIssuer>,
}

impl AppState {
    /// Wire services over the given repositories
    pub fn new(
        repositories: Repositories,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            user_service: UserService::new(repositories.users, hasher, Arc::clone(&tokens)),
            product_service: ProductService::new(repositories.products),
            tokens,
        }
    }
}
