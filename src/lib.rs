//! Catalog API
//!
//! A product catalog over HTTP with user registration and JWT bearer
//! authentication:
//! - Argon2 password hashing
//! - HS256 tokens with a configured lifetime
//! - In-memory or PostgreSQL storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;

use api::state::AppState;
use infrastructure::auth::JwtService;
use infrastructure::storage::Repositories;
use infrastructure::user::Argon2Hasher;

/// Build the application state from configuration.
///
/// Fails on a missing signing secret or unreachable storage.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let tokens = JwtService::new(config.auth.jwt_config())
        .context("Set APP__AUTH__JWT_SECRET to a non-empty value")?;

    let storage_config = config
        .database
        .storage_config()
        .context("Invalid database configuration")?;
    let repositories = Repositories::connect(&storage_config)
        .await
        .context("Failed to initialize storage")?;

    Ok(AppState::new(
        repositories,
        Arc::new(Argon2Hasher::new()),
        Arc::new(tokens),
    ))
}
