//! Wishlist row linking a user to a favorited product.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ProductId;

/// One product on one user's wishlist.
///
/// `(user_id, product_id)` is unique; adding the same product twice is a
/// conflict rather than a second row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WishlistEntry {
    /// Auto-increment row ID.
    pub id: i64,
    /// Owner of the wishlist.
    pub user_id: i64,
    /// Favorited product.
    pub product_id: ProductId,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}
