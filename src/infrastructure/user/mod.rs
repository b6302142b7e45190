//! User infrastructure module
//!
//! Argon2 password hashing, in-memory and PostgreSQL repositories, and the
//! service that registers users and exchanges credentials for tokens.

mod password;
mod postgres_repository;
mod repository;
mod service;

pub use password::Argon2Hasher;
pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::{AccessToken, RegisterUserRequest, UserService};
