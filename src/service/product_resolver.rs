//! Product resolution pipeline: store, then guarded upstream, then cache.

use std::fmt;
use std::sync::Arc;

use crate::cache::CatalogCache;
use crate::domain::{Product, ProductId};
use crate::error::ServiceError;
use crate::persistence::ProductStore;
use crate::resilience::{BreakerError, CircuitBreaker};
use crate::upstream::ProductSource;

/// Where a resolved product came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Durable product store.
    Store,
    /// Upstream product API.
    Upstream,
    /// Catalog snapshot in the cache.
    Cache,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store => f.write_str("store"),
            Self::Upstream => f.write_str("upstream"),
            Self::Cache => f.write_str("cache"),
        }
    }
}

/// Resolves product ids through three ordered tiers.
///
/// 1. [`ProductStore::find`]: a hit is returned as-is.
/// 2. [`ProductSource::fetch`] through the owned [`CircuitBreaker`].
/// 3. [`CatalogCache::lookup`].
///
/// A hit in tier 2 or 3 is saved to the store before it is returned, so the
/// store accumulates every product the service has ever resolved. Tiers run
/// strictly in sequence. Dropping the returned future abandons the
/// resolution; the write-back is only issued after the producing tier has
/// completed.
#[derive(Debug)]
pub struct ProductResolver {
    store: Arc<dyn ProductStore>,
    upstream: Arc<dyn ProductSource>,
    cache: Arc<dyn CatalogCache>,
    breaker: CircuitBreaker,
}

impl ProductResolver {
    /// Creates a resolver that owns `breaker`.
    #[must_use]
    pub fn new(
        store: Arc<dyn ProductStore>,
        upstream: Arc<dyn ProductSource>,
        cache: Arc<dyn CatalogCache>,
        breaker: CircuitBreaker,
    ) -> Self {
        Self {
            store,
            upstream,
            cache,
            breaker,
        }
    }

    /// The breaker guarding upstream calls.
    #[must_use]
    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    /// Resolves `id`, returning `Ok(None)` when no tier knows the product.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::PersistenceError`] if the initial store read
    /// fails or a write-back fails. Upstream and cache failures are never
    /// surfaced; they only move resolution to the next tier.
    pub async fn resolve(&self, id: ProductId) -> Result<Option<Product>, ServiceError> {
        Ok(self.resolve_with_tier(id).await?.map(|(product, _)| product))
    }

    /// Like [`resolve`](Self::resolve), also reporting which tier answered.
    ///
    /// # Errors
    ///
    /// Same as [`resolve`](Self::resolve).
    pub async fn resolve_with_tier(
        &self,
        id: ProductId,
    ) -> Result<Option<(Product, Tier)>, ServiceError> {
        // A store outage is not a miss: falling through would hide it behind
        // the cache.
        if let Some(stored) = self.store.find(id).await? {
            tracing::info!(product_id = %id, tier = %Tier::Store, "product resolved");
            return Ok(Some((stored.into_product(), Tier::Store)));
        }

        tracing::info!(product_id = %id, "product not in store, trying upstream");
        let upstream = &self.upstream;
        match self.breaker.call(|| upstream.fetch(id)).await {
            Ok(product) => {
                let product = self.write_back(product, Tier::Upstream).await?;
                return Ok(Some((product, Tier::Upstream)));
            }
            Err(BreakerError::Open) => {
                tracing::info!(
                    product_id = %id,
                    failure_count = self.breaker.failure_count(),
                    "upstream circuit open, falling back to catalog cache"
                );
            }
            Err(BreakerError::Inner(e)) => {
                tracing::warn!(
                    product_id = %id,
                    error = %e,
                    failure_count = self.breaker.failure_count(),
                    "upstream lookup failed, falling back to catalog cache"
                );
            }
        }

        match self.cache.lookup(id).await {
            Some(product) => {
                let product = self.write_back(product, Tier::Cache).await?;
                Ok(Some((product, Tier::Cache)))
            }
            None => {
                tracing::info!(product_id = %id, "product not found in any tier");
                Ok(None)
            }
        }
    }

    async fn write_back(&self, product: Product, tier: Tier) -> Result<Product, ServiceError> {
        match self.store.save(&product).await {
            Ok(stored) => {
                tracing::info!(product_id = %product.id, %tier, "product resolved and stored");
                Ok(stored.into_product())
            }
            Err(e) => {
                tracing::error!(product_id = %product.id, %tier, error = %e, "write-back failed");
                Err(e)
            }
        }
    }
}
