//! Wishlist DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::WishlistEntry;

/// Request body for `POST /users/{user_id}/wishlist`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToWishlistRequest {
    /// Product to add.
    pub product_id: i64,
}

/// Response body for `POST /users/{user_id}/wishlist` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct WishlistEntryResponse {
    /// Wishlist owner.
    pub user_id: i64,
    /// Added product.
    pub product_id: i64,
    /// Server creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<WishlistEntry> for WishlistEntryResponse {
    fn from(entry: WishlistEntry) -> Self {
        Self {
            user_id: entry.user_id,
            product_id: entry.product_id.get(),
            created_at: entry.created_at,
        }
    }
}
