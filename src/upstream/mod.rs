//! Upstream product authority: the remote service that owns product data.
//!
//! [`ProductSource`] is the seam the resolution pipeline calls through the
//! circuit breaker. [`HttpProductClient`] is the production implementation.

pub mod http_client;

use std::fmt;

use async_trait::async_trait;

use crate::domain::{Product, ProductId};

pub use http_client::HttpProductClient;

/// Classified failure of a single upstream lookup.
///
/// The pipeline treats every variant the same way ("this tier failed"); the
/// distinction exists for logs and tests.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Response was not JSON (typically an HTML error page).
    #[error("upstream unavailable: unexpected content type {content_type:?} from {url}")]
    Unavailable {
        /// Requested URL.
        url: String,
        /// Content type the server sent, if any.
        content_type: Option<String>,
    },

    /// Upstream answered 404.
    #[error("product not found upstream: {url}")]
    NotFound {
        /// Requested URL.
        url: String,
    },

    /// Upstream answered with another non-success status.
    #[error("upstream returned status {status} for {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// Body was JSON but not a usable product.
    #[error("malformed upstream response from {url}: {reason}")]
    Malformed {
        /// Requested URL.
        url: String,
        /// What was wrong with the body.
        reason: String,
    },

    /// Connection, TLS or timeout failure.
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Resolves one product from a remote authority.
#[async_trait]
pub trait ProductSource: Send + Sync + fmt::Debug {
    /// Fetches the product with the given id.
    ///
    /// # Errors
    ///
    /// Returns an [`UpstreamError`] describing why the lookup failed.
    async fn fetch(&self, id: ProductId) -> Result<Product, UpstreamError>;
}
