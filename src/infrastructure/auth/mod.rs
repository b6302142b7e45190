//! Authentication infrastructure module
//!
//! This module provides JWT bearer token issuance and verification.

mod jwt;

pub use jwt::{JwtConfig, JwtService, TokenClaims, TokenIssuer};
