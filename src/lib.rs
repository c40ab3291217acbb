//! # wishlist-service
//!
//! Wishlist backend built around a tiered product resolution pipeline.
//!
//! A product id is resolved against the local store first, then the upstream
//! product API (guarded by a circuit breaker), then a catalog snapshot held in
//! Redis. Whatever a remote tier returns is written back to the store, so the
//! store converges to every product the service has ever resolved.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── WishlistService, ProductResolver (service/)
//!     │
//!     ├── ProductStore, WishlistStore ── PostgreSQL (persistence/)
//!     ├── CircuitBreaker (resilience/)
//!     │       └── ProductSource ── products API (upstream/)
//!     └── CatalogCache ── Redis snapshot (cache/)
//! ```

pub mod api;
pub mod app_state;
pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod resilience;
pub mod service;
pub mod upstream;

#[cfg(test)]
mod testing;
