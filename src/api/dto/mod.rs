//! Data Transfer Objects for REST request/response serialization.
//!
//! Product ids are plain JSON integers on the wire.

pub mod product_dto;
pub mod wishlist_dto;

pub use product_dto::*;
pub use wishlist_dto::*;
