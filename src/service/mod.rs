//! Service layer: business logic orchestration.
//!
//! [`ProductResolver`] is the tiered product lookup; [`WishlistService`]
//! is its consumer for wishlist mutations.

pub mod product_resolver;
pub mod wishlist_service;

pub use product_resolver::{ProductResolver, Tier};
pub use wishlist_service::WishlistService;
