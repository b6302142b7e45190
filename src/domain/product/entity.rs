//! Product entity

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{DomainError, EntityId};

/// A catalog product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    id: EntityId,
    name: String,
    price: f64,
    /// Set once at creation; listing order key
    created_at: DateTime<Utc>,
}

impl Product {
    /// Create a new product with a fresh id and the current timestamp
    pub fn new(name: impl Into<String>, price: f64) -> Result<Self, DomainError> {
        Self::restore(EntityId::new(), name, price, Utc::now())
    }

    /// Rebuild a product from stored fields
    pub fn restore(
        id: EntityId,
        name: impl Into<String>,
        price: f64,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        validate_product(&name, price)?;

        Ok(Self {
            id,
            name,
            price,
            created_at,
        })
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replace the mutable fields, keeping id and creation time
    pub fn revise(&mut self, name: impl Into<String>, price: f64) -> Result<(), DomainError> {
        let name = name.into();
        validate_product(&name, price)?;

        self.name = name;
        self.price = price;
        Ok(())
    }
}

fn validate_product(name: &str, price: f64) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::invalid_product("name is required"));
    }

    if !price.is_finite() {
        return Err(DomainError::invalid_product("price must be a finite number"));
    }

    if price < 0.0 {
        return Err(DomainError::invalid_product("price must not be negative"));
    }

    Ok(())
}
