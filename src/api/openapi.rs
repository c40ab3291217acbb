//! OpenAPI document assembled from the handler annotations.

use utoipa::OpenApi;

use crate::api::dto::{AddToWishlistRequest, ProductResponse, WishlistEntryResponse};
use crate::api::handlers::system::{HealthResponse, UpstreamBreakerStatus};
use crate::error::{ErrorBody, ErrorResponse};

/// OpenAPI description of the REST surface.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "wishlist-service",
        description = "Wishlist backend with tiered product resolution"
    ),
    paths(
        crate::api::handlers::system::health_handler,
        crate::api::handlers::product::get_product,
        crate::api::handlers::wishlist::add_to_wishlist,
    ),
    components(schemas(
        HealthResponse,
        UpstreamBreakerStatus,
        ProductResponse,
        AddToWishlistRequest,
        WishlistEntryResponse,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "System", description = "Service health"),
        (name = "Products", description = "Product resolution"),
        (name = "Wishlists", description = "Wishlist management"),
    )
)]
pub struct ApiDoc;
