//! Domain layer - Core business logic and entities

pub mod error;
pub mod id;
pub mod product;
pub mod user;

pub use error::DomainError;
pub use id::EntityId;
pub use product::{PageRequest, Product, ProductRepository, SortOrder};
pub use user::{PasswordHasher, User, UserRepository};
