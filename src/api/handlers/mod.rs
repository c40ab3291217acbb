//! REST endpoint handlers organized by resource.

pub mod product;
pub mod system;
pub mod wishlist;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(product::routes())
        .merge(wishlist::routes())
}
