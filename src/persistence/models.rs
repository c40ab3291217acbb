//! Database row shapes for products and wishlists.

use chrono::{DateTime, Utc};

use crate::domain::{Product, ProductId, StoredProduct, WishlistEntry};

/// A row from the `products` table, in column order.
pub type ProductRow = (
    i64,
    String,
    f64,
    String,
    Option<String>,
    Option<f64>,
    DateTime<Utc>,
);

/// A row from the `wishlists` table, in column order.
pub type WishlistRow = (i64, i64, i64, DateTime<Utc>);

/// Column list matching [`ProductRow`].
pub const PRODUCT_COLUMNS: &str = "id, title, price, image, brand, review_score, created_at";

/// Converts a `products` row into a [`StoredProduct`].
#[must_use]
pub fn stored_product_from_row(row: ProductRow) -> StoredProduct {
    let (id, title, price, image, brand, review_score, created_at) = row;
    StoredProduct {
        product: Product {
            id: ProductId::new(id),
            title,
            price,
            image,
            brand,
            review_score,
        },
        created_at,
    }
}

/// Converts a `wishlists` row into a [`WishlistEntry`].
#[must_use]
pub fn wishlist_entry_from_row(row: WishlistRow) -> WishlistEntry {
    let (id, user_id, product_id, created_at) = row;
    WishlistEntry {
        id,
        user_id,
        product_id: ProductId::new(product_id),
        created_at,
    }
}
