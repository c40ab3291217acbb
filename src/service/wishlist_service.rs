//! Wishlist service: adds resolved products to a user's wishlist.

use std::sync::Arc;

use crate::domain::{ProductId, WishlistEntry};
use crate::error::ServiceError;
use crate::persistence::WishlistStore;

use super::ProductResolver;

/// Adds products to wishlists, resolving them first.
///
/// Resolution guarantees the product row exists before the wishlist row
/// that references it is inserted.
#[derive(Debug, Clone)]
pub struct WishlistService {
    resolver: Arc<ProductResolver>,
    store: Arc<dyn WishlistStore>,
}

impl WishlistService {
    /// Creates a new `WishlistService`.
    #[must_use]
    pub fn new(resolver: Arc<ProductResolver>, store: Arc<dyn WishlistStore>) -> Self {
        Self { resolver, store }
    }

    /// Adds `product_id` to the wishlist of `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidRequest`] for a non-positive user id,
    /// [`ServiceError::ProductNotFound`] if no tier knows the product,
    /// [`ServiceError::AlreadyInWishlist`] for a duplicate, or a persistence
    /// error from either step.
    pub async fn add_product(
        &self,
        user_id: i64,
        product_id: ProductId,
    ) -> Result<WishlistEntry, ServiceError> {
        if user_id <= 0 {
            return Err(ServiceError::InvalidRequest(format!(
                "user id must be positive, got {user_id}"
            )));
        }

        let product = self
            .resolver
            .resolve(product_id)
            .await?
            .ok_or(ServiceError::ProductNotFound(product_id))?;

        let entry = self.store.add(user_id, product.id).await?;
        tracing::info!(user_id, product_id = %product.id, "product added to wishlist");
        Ok(entry)
    }
}
