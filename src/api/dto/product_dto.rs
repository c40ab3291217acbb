//! Product DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Product;

/// Response body for `GET /products/{id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    /// Product identifier.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: f64,
    /// Image URL.
    pub image: String,
    /// Brand name, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Aggregate review score, if known.
    #[serde(rename = "reviewScore", skip_serializing_if = "Option::is_none")]
    pub review_score: Option<f64>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id.get(),
            title: p.title,
            price: p.price,
            image: p.image,
            brand: p.brand,
            review_score: p.review_score,
        }
    }
}
