//! Password hashing contract

use std::fmt::Debug;

use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Salted one-way password transform
#[cfg_attr(test, automock)]
pub trait PasswordHasher: Send + Sync + Debug {
    /// Hash a plaintext password; two calls on the same input never match
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Check a candidate against a stored hash.
    ///
    /// Any mismatch, malformed hash or internal failure yields `false`.
    fn verify(&self, hash: &str, candidate: &str) -> bool;
}
