//! Domain layer: product identity, the product aggregate, wishlist rows.
//!
//! These types are shared by every tier of the resolution pipeline and by
//! the persistence and HTTP layers.

pub mod product;
pub mod product_id;
pub mod wishlist;

pub use product::{Product, ProductError, StoredProduct};
pub use product_id::ProductId;
pub use wishlist::WishlistEntry;
