//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::{ProductResolver, WishlistService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Product resolution pipeline, also consulted for breaker health.
    pub resolver: Arc<ProductResolver>,
    /// Wishlist mutations.
    pub wishlist_service: Arc<WishlistService>,
}
