//! Product domain
//!
//! Product entity, listing order/pagination types and the repository trait.

mod entity;
mod pagination;
mod repository;

pub use entity::Product;
pub use pagination::{PageRequest, SortOrder};
pub use repository::ProductRepository;

#[cfg(test)]
pub use repository::MockProductRepository;
