//! JWT bearer token issuance and verification

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::{DomainError, EntityId};

/// Signed token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration timestamp (Unix epoch seconds)
    pub exp: i64,
}

impl TokenClaims {
    /// Claims for `subject` expiring `ttl_secs` from now
    pub fn new(subject: &EntityId, ttl_secs: u64) -> Self {
        let ttl = i64::try_from(ttl_secs).unwrap_or(i64::MAX);

        Self {
            sub: subject.to_string(),
            exp: Utc::now().timestamp().saturating_add(ttl),
        }
    }

    /// Parse the subject back into an identifier
    pub fn subject_id(&self) -> Result<EntityId, DomainError> {
        EntityId::parse(&self.sub)
    }
}

/// Signing configuration, built once at startup
#[derive(Clone)]
pub struct JwtConfig {
    /// Shared HMAC secret
    pub secret: String,
    /// Default token lifetime in seconds
    pub expires_in_secs: u64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expires_in_secs: u64) -> Self {
        Self {
            secret: secret.into(),
            expires_in_secs,
        }
    }
}

impl Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[hidden]")
            .field("expires_in_secs", &self.expires_in_secs)
            .finish()
    }
}

/// Trait for bearer token operations
pub trait TokenIssuer: Send + Sync + Debug {
    /// Sign a token for `subject` valid for `ttl_secs`
    fn issue(&self, subject: &EntityId, ttl_secs: u64) -> Result<String, DomainError>;

    /// Check signature and expiry, returning the claims
    fn verify(&self, token: &str) -> Result<TokenClaims, DomainError>;

    /// Configured token lifetime in seconds
    fn ttl_secs(&self) -> u64;
}

/// HS256 JWT service using a shared secret
#[derive(Clone)]
pub struct JwtService {
    expires_in_secs: u64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("expires_in_secs", &self.expires_in_secs)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service; an empty secret is rejected
    pub fn new(config: JwtConfig) -> Result<Self, DomainError> {
        if config.secret.trim().is_empty() {
            return Err(DomainError::signing("JWT signing secret is not configured"));
        }

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            expires_in_secs: config.expires_in_secs,
            encoding_key,
            decoding_key,
            validation,
        })
    }
}

impl TokenIssuer for JwtService {
    fn issue(&self, subject: &EntityId, ttl_secs: u64) -> Result<String, DomainError> {
        let claims = TokenClaims::new(subject, ttl_secs);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::signing(format!("Failed to sign token: {}", e)))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, DomainError> {
        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => DomainError::token_expired("token has expired"),
                _ => DomainError::token_invalid(e.to_string()),
            })?;

        Ok(token_data.claims)
    }

    fn ttl_secs(&self) -> u64 {
        self.expires_in_secs
    }
}
