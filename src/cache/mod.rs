//! Catalog cache: the last-resort product source.
//!
//! A pre-loaded catalog snapshot lives under a single cache key. The
//! pipeline only ever reads it; the `catalog-loader` binary writes it.
//! Lookups are advisory, so [`CatalogCache::lookup`] reports every failure
//! as "absent" after logging it.

pub mod redis_catalog;
pub mod snapshot;

use std::fmt;

use async_trait::async_trait;

use crate::domain::{Product, ProductId};

pub use redis_catalog::RedisCatalog;

/// Failure while reading or decoding the catalog snapshot.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Cache backend unreachable or returned an error.
    #[error("cache backend error: {0}")]
    Backend(#[from] redis::RedisError),

    /// Read did not finish within the configured timeout.
    #[error("cache read timed out")]
    Timeout,

    /// Snapshot or matching record could not be decoded.
    #[error("catalog decode error: {0}")]
    Decode(String),
}

/// Read-only access to the catalog snapshot.
#[async_trait]
pub trait CatalogCache: Send + Sync + fmt::Debug {
    /// Returns the first snapshot record with the given id, or `None` when
    /// there is no match, no snapshot, or the cache could not be read.
    async fn lookup(&self, id: ProductId) -> Option<Product>;
}
