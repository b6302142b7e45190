use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid identifier: {message}")]
    InvalidIdentifier { message: String },

    #[error("Invalid product: {message}")]
    InvalidProduct { message: String },

    #[error("Invalid user: {message}")]
    InvalidUser { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Duplicate email: {message}")]
    DuplicateEmail { message: String },

    #[error("Credential error: {message}")]
    Credential { message: String },

    #[error("Signing error: {message}")]
    Signing { message: String },

    #[error("Invalid token: {message}")]
    TokenInvalid { message: String },

    #[error("Token expired: {message}")]
    TokenExpired { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn invalid_identifier(message: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            message: message.into(),
        }
    }

    pub fn invalid_product(message: impl Into<String>) -> Self {
        Self::InvalidProduct {
            message: message.into(),
        }
    }

    pub fn invalid_user(message: impl Into<String>) -> Self {
        Self::InvalidUser {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn duplicate_email(message: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            message: message.into(),
        }
    }

    pub fn credential(message: impl Into<String>) -> Self {
        Self::Credential {
            message: message.into(),
        }
    }

    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing {
            message: message.into(),
        }
    }

    pub fn token_invalid(message: impl Into<String>) -> Self {
        Self::TokenInvalid {
            message: message.into(),
        }
    }

    pub fn token_expired(message: impl Into<String>) -> Self {
        Self::TokenExpired {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}
