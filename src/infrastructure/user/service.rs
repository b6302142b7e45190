//! User service for registration and token issuance

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::domain::{DomainError, PasswordHasher, User, UserRepository};
use crate::infrastructure::auth::TokenIssuer;

/// Well-formed Argon2id hash with default cost that matches no password.
///
/// Verified against when the email is unknown so both failure paths take
/// the same time.
const UNKNOWN_USER_HASH: &str = concat!(
    "$argon2id$v=19$m=19456,t=2,p=1$OtOsqVbMjv1Jdn1wVbNj8A$",
    "edFoAyOBB9Ckqgn2TJKFx7kN6oaDX5/PicrvUXN7t7Y",
);

/// Request for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Bearer token handed out on successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(skip)]
    pub expires_in: u64,
}

/// User service for registration and authentication
#[derive(Debug, Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl UserService {
    /// Create a new user service
    pub fn new(
        repository: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            repository,
            hasher,
            tokens,
        }
    }

    /// Register a new user.
    ///
    /// Hashing is CPU-bound, so it runs on the blocking pool.
    pub async fn register(&self, request: RegisterUserRequest) -> Result<User, DomainError> {
        let hasher = Arc::clone(&self.hasher);
        let RegisterUserRequest {
            name,
            email,
            password,
        } = request;

        let user = tokio::task::spawn_blocking(move || {
            User::register(name, &email, &password, hasher.as_ref())
        })
        .await
        .map_err(|e| DomainError::credential(format!("Password hashing task failed: {}", e)))??;

        self.repository.create(&user).await?;

        info!(user_id = %user.id(), "Registered user");
        Ok(user)
    }

    /// Exchange credentials for a bearer token.
    ///
    /// Unknown email and wrong password both yield `None`, and both pay for
    /// one full password verification.
    pub async fn issue_token(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<AccessToken>, DomainError> {
        let user = match self.repository.find_by_email(email).await {
            Ok(user) => Some(user),
            Err(DomainError::NotFound { .. }) => None,
            Err(e) => return Err(e),
        };

        let hasher = Arc::clone(&self.hasher);
        let candidate = password.to_string();
        let stored = user.clone();
        let verified = tokio::task::spawn_blocking(move || match stored {
            Some(user) => user.verify_password(&candidate, hasher.as_ref()),
            None => hasher.verify(UNKNOWN_USER_HASH, &candidate),
        })
        .await
        .map_err(|e| DomainError::credential(format!("Password verification task failed: {}", e)))?;

        let Some(user) = user else {
            debug!("Token requested for unknown email");
            return Ok(None);
        };

        if !verified {
            debug!(user_id = %user.id(), "Token requested with bad credentials");
            return Ok(None);
        }

        let ttl = self.tokens.ttl_secs();
        let access_token = self.tokens.issue(user.id(), ttl)?;

        info!(user_id = %user.id(), "Issued access token");
        Ok(Some(AccessToken {
            access_token,
            expires_in: ttl,
        }))
    }
}
