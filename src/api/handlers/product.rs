//! Product lookup handler.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::ProductResponse;
use crate::app_state::AppState;
use crate::domain::ProductId;
use crate::error::{ErrorResponse, ServiceError};

/// `GET /products/{id}`: Resolve a product.
///
/// # Errors
///
/// Returns [`ServiceError::ProductNotFound`] when no tier knows the product,
/// or a persistence error if the store is unavailable.
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    tag = "Products",
    summary = "Resolve a product",
    description = "Looks the product up in the local store, then the upstream product API (guarded by a circuit breaker), then the catalog cache. Products found upstream or in the cache are stored locally before being returned.",
    params(
        ("id" = i64, Path, description = "Product id"),
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found in any tier", body = ErrorResponse),
        (status = 500, description = "Product store unavailable", body = ErrorResponse),
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let product_id = ProductId::new(id);
    let product = state
        .resolver
        .resolve(product_id)
        .await?
        .ok_or(ServiceError::ProductNotFound(product_id))?;

    Ok(Json(ProductResponse::from(product)))
}

/// Product routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/products/{id}", get(get_product))
}
