//! Wishlist mutation handler.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{AddToWishlistRequest, WishlistEntryResponse};
use crate::app_state::AppState;
use crate::domain::ProductId;
use crate::error::{ErrorResponse, ServiceError};

/// `POST /users/{user_id}/wishlist`: Add a product to a wishlist.
///
/// # Errors
///
/// Returns [`ServiceError`] if the product cannot be resolved, is already
/// on the wishlist, or storage fails.
#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/wishlist",
    tag = "Wishlists",
    summary = "Add a product to a wishlist",
    description = "Resolves the product and records it on the user's wishlist. Each product can appear once per user.",
    params(
        ("user_id" = i64, Path, description = "Wishlist owner"),
    ),
    request_body = AddToWishlistRequest,
    responses(
        (status = 201, description = "Product added", body = WishlistEntryResponse),
        (status = 400, description = "Invalid user id", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 409, description = "Product already in wishlist", body = ErrorResponse),
    )
)]
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<AddToWishlistRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let entry = state
        .wishlist_service
        .add_product(user_id, ProductId::new(req.product_id))
        .await?;

    Ok((StatusCode::CREATED, Json(WishlistEntryResponse::from(entry))))
}

/// Wishlist routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/users/{user_id}/wishlist", post(add_to_wishlist))
}
