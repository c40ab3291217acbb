//! Product aggregate shared by every resolution tier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ProductId;

/// Validation failure for a decoded [`Product`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProductError {
    /// Price is below zero.
    #[error("price must be non-negative, got {0}")]
    NegativePrice(f64),

    /// Price is NaN or infinite.
    #[error("price must be a finite number")]
    NonFinitePrice,
}

/// A product as known to the service.
///
/// The same shape is produced by a database read, by decoding an upstream
/// API response and by decoding a catalog snapshot entry. The JSON wire
/// format uses `reviewScore` for the review score and ignores unknown fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Externally assigned identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price, never negative.
    pub price: f64,
    /// Image URL.
    pub image: String,
    /// Brand name, when the source provides one.
    #[serde(default)]
    pub brand: Option<String>,
    /// Aggregate review score, when the source provides one.
    #[serde(default, rename = "reviewScore")]
    pub review_score: Option<f64>,
}

impl Product {
    /// Checks the price invariant.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError`] if the price is negative or not finite.
    pub fn validate(&self) -> Result<(), ProductError> {
        if !self.price.is_finite() {
            return Err(ProductError::NonFinitePrice);
        }
        if self.price < 0.0 {
            return Err(ProductError::NegativePrice(self.price));
        }
        Ok(())
    }
}

/// A product row as persisted, with its server-assigned creation time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredProduct {
    /// The persisted product fields.
    pub product: Product,
    /// When the row was first inserted.
    pub created_at: DateTime<Utc>,
}

impl StoredProduct {
    /// Discards storage metadata.
    #[must_use]
    pub fn into_product(self) -> Product {
        self.product
    }
}
