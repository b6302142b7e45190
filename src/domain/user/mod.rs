//! User domain
//!
//! This module provides domain types and traits for user registration and
//! authentication, including the user entity, validation, the password
//! hashing contract and the repository trait.

mod entity;
mod hasher;
mod repository;
mod validation;

pub use entity::User;
pub use hasher::PasswordHasher;
pub use repository::UserRepository;
pub use validation::{
    normalize_email, validate_email, validate_name, validate_password, UserValidationError,
};

#[cfg(test)]
pub use hasher::MockPasswordHasher;
#[cfg(test)]
pub use repository::MockUserRepository;
