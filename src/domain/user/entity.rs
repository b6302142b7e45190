//! User entity

use serde::Serialize;

use super::hasher::PasswordHasher;
use super::validation::{normalize_email, validate_email, validate_name, validate_password};
use crate::domain::{DomainError, EntityId};

/// Registered user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    id: EntityId,
    name: String,
    /// Normalized (trimmed, lower-case); unique across users
    email: String,
    /// Argon2 password hash - never exposed in serialization
    #[serde(skip_serializing)]
    password_hash: String,
}

impl User {
    /// Register a new user, hashing the plaintext password.
    ///
    /// The plaintext is only borrowed for the duration of the hash and is
    /// never stored on the entity.
    pub fn register(
        name: impl Into<String>,
        email: &str,
        password: &str,
        hasher: &dyn PasswordHasher,
    ) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        let email = normalize_email(email);

        validate_name(&name).map_err(|e| DomainError::invalid_user(e.to_string()))?;
        validate_email(&email).map_err(|e| DomainError::invalid_user(e.to_string()))?;
        validate_password(password).map_err(|e| DomainError::invalid_user(e.to_string()))?;

        let password_hash = hasher.hash(password)?;

        Ok(Self {
            id: EntityId::new(),
            name,
            email,
            password_hash,
        })
    }

    /// Rebuild a user from stored fields
    pub fn restore(
        id: EntityId,
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Check a candidate password against the stored hash
    pub fn verify_password(&self, candidate: &str, hasher: &dyn PasswordHasher) -> bool {
        hasher.verify(&self.password_hash, candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reversible stand-in so entity tests stay fast
    #[derive(Debug)]
    struct PrefixHasher;

    impl PasswordHasher for PrefixHasher {
        fn hash(&self, password: &str) -> Result<String, DomainError> {
            Ok(format!("hashed:{}", password))
        }

        fn verify(&self, hash: &str, candidate: &str) -> bool {
            hash == format!("hashed:{}", candidate)
        }
    }

    #[derive(Debug)]
    struct FailingHasher;

    impl PasswordHasher for FailingHasher {
        fn hash(&self, _password: &str) -> Result<String, DomainError> {
            Err(DomainError::credential("out of memory"))
        }

        fn verify(&self, _hash: &str, _candidate: &str) -> bool {
            false
        }
    }

    #[test]
    fn test_register_hashes_password() {
        let user = User::register("A", "a@x.com", "secret", &PrefixHasher).unwrap();

        assert_eq!(user.name(), "A");
        assert_eq!(user.email(), "a@x.com");
        assert_eq!(user.password_hash(), "hashed:secret");
        assert!(user.verify_password("secret", &PrefixHasher));
        assert!(!user.verify_password("wrong", &PrefixHasher));
    }

    #[test]
    fn test_register_normalizes_email_and_name() {
        let user = User::register("  Ada ", " Ada@Example.COM ", "pw", &PrefixHasher).unwrap();

        assert_eq!(user.name(), "Ada");
        assert_eq!(user.email(), "ada@example.com");
    }

    #[test]
    fn test_register_rejects_invalid_input() {
        let cases = [("", "a@x.com", "pw"), ("A", "nope", "pw"), ("A", "a@x.com", "")];

        for (name, email, password) in cases {
            let err = User::register(name, email, password, &PrefixHasher).unwrap_err();
            assert!(matches!(err, DomainError::InvalidUser { .. }));
        }
    }

    #[test]
    fn test_register_propagates_hash_failure() {
        let err = User::register("A", "a@x.com", "secret", &FailingHasher).unwrap_err();
        assert!(matches!(err, DomainError::Credential { .. }));
    }

    #[test]
    fn test_serialization_excludes_password() {
        let user = User::register("A", "a@x.com", "secret", &PrefixHasher).unwrap();

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("hashed:secret"));
        assert!(!json.contains("password"));
        assert!(json.contains("a@x.com"));
    }

    #[test]
    fn test_restore() {
        let id = EntityId::new();
        let user = User::restore(id, "B", "b@x.com", "stored-hash");

        assert_eq!(user.id(), &id);
        assert_eq!(user.password_hash(), "stored-hash");
    }
}
