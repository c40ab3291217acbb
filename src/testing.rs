//! In-memory doubles for the pipeline's collaborators, with call counters.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use crate::cache::CatalogCache;
use crate::domain::{Product, ProductId, StoredProduct, WishlistEntry};
use crate::error::ServiceError;
use crate::persistence::{ProductStore, WishlistStore};
use crate::upstream::{ProductSource, UpstreamError};

pub(crate) fn product(id: i64, title: &str, price: f64) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        price,
        image: format!("http://example.com/{id}.jpg"),
        brand: None,
        review_score: None,
    }
}

#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    rows: Mutex<HashMap<ProductId, StoredProduct>>,
    find_calls: AtomicUsize,
    save_calls: AtomicUsize,
    fail_find: bool,
    fail_save: bool,
}

impl MemoryStore {
    pub(crate) fn with(products: &[Product]) -> Self {
        let store = Self::default();
        {
            let mut rows = store.rows.lock().unwrap_or_else(PoisonError::into_inner);
            for p in products {
                rows.insert(
                    p.id,
                    StoredProduct {
                        product: p.clone(),
                        created_at: Utc::now(),
                    },
                );
            }
        }
        store
    }

    /// Every `find` fails with a persistence error.
    pub(crate) fn failing_find() -> Self {
        Self {
            fail_find: true,
            ..Self::default()
        }
    }

    /// Every `save` fails with a persistence error.
    pub(crate) fn failing_save() -> Self {
        Self {
            fail_save: true,
            ..Self::default()
        }
    }

    pub(crate) fn get(&self, id: ProductId) -> Option<Product> {
        self.rows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .map(|s| s.product.clone())
    }

    pub(crate) fn finds(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn saves(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn find(&self, id: ProductId) -> Result<Option<StoredProduct>, ServiceError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_find {
            return Err(ServiceError::PersistenceError("connection refused".to_string()));
        }
        Ok(self
            .rows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned())
    }

    async fn save(&self, product: &Product) -> Result<StoredProduct, ServiceError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_save {
            return Err(ServiceError::PersistenceError("disk full".to_string()));
        }
        let stored = StoredProduct {
            product: product.clone(),
            created_at: Utc::now(),
        };
        self.rows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(product.id, stored.clone());
        Ok(stored)
    }
}

/// Upstream double: serves `products`, answers 404 for anything else, or
/// fails every call when `down` is set.
#[derive(Debug, Default)]
pub(crate) struct StubSource {
    products: HashMap<ProductId, Product>,
    down: bool,
    calls: AtomicUsize,
}

impl StubSource {
    pub(crate) fn serving(products: &[Product]) -> Self {
        Self {
            products: products.iter().map(|p| (p.id, p.clone())).collect(),
            ..Self::default()
        }
    }

    pub(crate) fn down() -> Self {
        Self {
            down: true,
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductSource for StubSource {
    async fn fetch(&self, id: ProductId) -> Result<Product, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let url = format!("https://upstream.test/{id}/");
        if self.down {
            return Err(UpstreamError::Status { url, status: 503 });
        }
        self.products
            .get(&id)
            .cloned()
            .ok_or(UpstreamError::NotFound { url })
    }
}

#[derive(Debug, Default)]
pub(crate) struct StubCatalog {
    products: HashMap<ProductId, Product>,
    calls: AtomicUsize,
}

impl StubCatalog {
    pub(crate) fn with(products: &[Product]) -> Self {
        Self {
            products: products.iter().map(|p| (p.id, p.clone())).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogCache for StubCatalog {
    async fn lookup(&self, id: ProductId) -> Option<Product> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.products.get(&id).cloned()
    }
}

#[derive(Debug, Default)]
pub(crate) struct MemoryWishlist {
    pairs: Mutex<HashSet<(i64, ProductId)>>,
}

#[async_trait]
impl WishlistStore for MemoryWishlist {
    async fn add(
        &self,
        user_id: i64,
        product_id: ProductId,
    ) -> Result<WishlistEntry, ServiceError> {
        let mut pairs = self.pairs.lock().unwrap_or_else(PoisonError::into_inner);
        if !pairs.insert((user_id, product_id)) {
            return Err(ServiceError::AlreadyInWishlist {
                user_id,
                product_id,
            });
        }
        Ok(WishlistEntry {
            id: i64::try_from(pairs.len()).unwrap_or(i64::MAX),
            user_id,
            product_id,
            created_at: Utc::now(),
        })
    }
}

/// Application state over in-memory doubles with a closed breaker.
pub(crate) fn app_state(upstream: StubSource, catalog: StubCatalog) -> crate::app_state::AppState {
    use std::sync::Arc;
    use std::time::Duration;

    use crate::resilience::CircuitBreaker;
    use crate::service::{ProductResolver, WishlistService};

    let resolver = Arc::new(ProductResolver::new(
        Arc::new(MemoryStore::default()) as Arc<dyn ProductStore>,
        Arc::new(upstream) as Arc<dyn ProductSource>,
        Arc::new(catalog) as Arc<dyn CatalogCache>,
        CircuitBreaker::new("products-api", 3, Duration::from_secs(10)),
    ));
    let wishlist_service = Arc::new(WishlistService::new(
        Arc::clone(&resolver),
        Arc::new(MemoryWishlist::default()) as Arc<dyn WishlistStore>,
    ));
    crate::app_state::AppState {
        resolver,
        wishlist_service,
    }
}
