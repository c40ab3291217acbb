//! Persistence layer: durable product records and wishlist rows.
//!
//! The [`ProductStore`] and [`WishlistStore`] traits are what the service
//! layer depends on. The concrete implementation uses `sqlx::PgPool` for
//! async PostgreSQL access; schema lives in `migrations/`.

pub mod models;
pub mod postgres;

use std::fmt;

use async_trait::async_trait;

use crate::domain::{Product, ProductId, StoredProduct, WishlistEntry};
use crate::error::ServiceError;

pub use postgres::PostgresPersistence;

/// Durable product storage, the first tier of resolution and the target of
/// every write-back.
#[async_trait]
pub trait ProductStore: Send + Sync + fmt::Debug {
    /// Reads a product by id. Absence is `Ok(None)`, never an error.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::PersistenceError`] on query or connection
    /// failure.
    async fn find(&self, id: ProductId) -> Result<Option<StoredProduct>, ServiceError>;

    /// Inserts `product`, or overwrites the fields of an existing row with
    /// the same id, and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::PersistenceError`] on query or connection
    /// failure.
    async fn save(&self, product: &Product) -> Result<StoredProduct, ServiceError>;
}

/// Storage for wishlist rows.
#[async_trait]
pub trait WishlistStore: Send + Sync + fmt::Debug {
    /// Adds `product_id` to the wishlist of `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::AlreadyInWishlist`] if the pair already
    /// exists, or [`ServiceError::PersistenceError`] on other failures.
    async fn add(&self, user_id: i64, product_id: ProductId)
    -> Result<WishlistEntry, ServiceError>;
}
