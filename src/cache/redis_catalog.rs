//! Redis-backed catalog snapshot.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tokio::sync::OnceCell;

use super::snapshot::find_in_snapshot;
use super::{CacheError, CatalogCache};
use crate::domain::{Product, ProductId};

/// Catalog snapshot stored as a JSON string under one Redis key.
///
/// The connection is established on first use, so the service can start
/// while Redis is still down; a failed attempt is retried on the next lookup.
pub struct RedisCatalog {
    client: redis::Client,
    connection: OnceCell<ConnectionManager>,
    key: String,
    timeout: Duration,
}

impl RedisCatalog {
    /// Creates a catalog reader for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Backend`] if `url` is not a valid Redis URL.
    pub fn new(url: &str, key: &str, timeout: Duration) -> Result<Self, CacheError> {
        Ok(Self {
            client: redis::Client::open(url)?,
            connection: OnceCell::new(),
            key: key.to_string(),
            timeout,
        })
    }

    /// Reads the raw snapshot, `None` if the key is not set.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Backend`] on connection or command failure.
    pub async fn raw_snapshot(&self) -> Result<Option<String>, CacheError> {
        let mut conn = self
            .connection
            .get_or_try_init(|| ConnectionManager::new(self.client.clone()))
            .await?
            .clone();
        let raw: Option<String> = conn.get(&self.key).await?;
        Ok(raw)
    }

    async fn try_lookup(&self, id: ProductId) -> Result<Option<Product>, CacheError> {
        let raw = tokio::time::timeout(self.timeout, self.raw_snapshot())
            .await
            .map_err(|_| CacheError::Timeout)??;

        match raw {
            Some(raw) => find_in_snapshot(&raw, id),
            None => {
                tracing::warn!(key = %self.key, "catalog snapshot not found in cache");
                Ok(None)
            }
        }
    }
}

impl fmt::Debug for RedisCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisCatalog")
            .field("key", &self.key)
            .field("timeout", &self.timeout)
            .field("connected", &self.connection.initialized())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CatalogCache for RedisCatalog {
    async fn lookup(&self, id: ProductId) -> Option<Product> {
        match self.try_lookup(id).await {
            Ok(Some(product)) => {
                tracing::info!(product_id = %id, "product found in catalog cache");
                Some(product)
            }
            Ok(None) => {
                tracing::info!(product_id = %id, "product not in catalog cache");
                None
            }
            Err(e) => {
                tracing::error!(product_id = %id, error = %e, "catalog cache lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_url() {
        assert!(RedisCatalog::new("not a url", "catalog", Duration::from_millis(10)).is_err());
    }

    #[tokio::test]
    async fn unreachable_backend_is_absent() {
        // Port 1 is never a Redis server.
        let Ok(catalog) =
            RedisCatalog::new("redis://127.0.0.1:1/0", "catalog", Duration::from_millis(500))
        else {
            panic!("valid url");
        };
        assert!(catalog.lookup(ProductId::new(1)).await.is_none());
    }
}
