//! wishlist-service server entry point.
//!
//! Connects to PostgreSQL, wires the product resolution pipeline and starts
//! the Axum HTTP server.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use wishlist_service::api;
use wishlist_service::app_state::AppState;
use wishlist_service::cache::{CatalogCache, RedisCatalog};
use wishlist_service::config::{LogFormat, ServiceConfig};
use wishlist_service::persistence::{PostgresPersistence, ProductStore, WishlistStore};
use wishlist_service::resilience::CircuitBreaker;
use wishlist_service::service::{ProductResolver, WishlistService};
use wishlist_service::upstream::{HttpProductClient, ProductSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config =
        ServiceConfig::from_env().map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Plain => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(addr = %config.listen_addr, "starting wishlist-service");

    // Build persistence layer
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect(&config.database_url)
        .await
        .context("connecting to postgres")?;
    let persistence = Arc::new(PostgresPersistence::new(pool));
    if config.run_migrations {
        persistence.migrate().await?;
        tracing::info!("database migrations applied");
    }

    // Build remote tiers
    let upstream = HttpProductClient::new(&config.products_api_url, config.products_api_timeout())?;
    let catalog = RedisCatalog::new(
        &config.redis_url,
        &config.catalog_key,
        config.cache_timeout(),
    )?;
    let breaker = CircuitBreaker::new(
        "products-api",
        config.breaker_fail_max,
        config.breaker_reset_timeout(),
    );
    tracing::info!(
        upstream = %config.products_api_url,
        catalog_key = %config.catalog_key,
        fail_max = config.breaker_fail_max,
        reset_timeout_secs = config.breaker_reset_timeout_secs,
        "product resolution pipeline configured"
    );

    // Build service layer
    let resolver = Arc::new(ProductResolver::new(
        Arc::clone(&persistence) as Arc<dyn ProductStore>,
        Arc::new(upstream) as Arc<dyn ProductSource>,
        Arc::new(catalog) as Arc<dyn CatalogCache>,
        breaker,
    ));
    let wishlist_service = Arc::new(WishlistService::new(
        Arc::clone(&resolver),
        persistence as Arc<dyn WishlistStore>,
    ));

    // Build application state
    let app_state = AppState {
        resolver,
        wishlist_service,
    };

    // Build router
    let app = Router::new().merge(api::build_router());

    #[cfg(feature = "swagger-ui")]
    let app = {
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        app.merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", api::openapi::ApiDoc::openapi()),
        )
    };

    let app = app
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.request_timeout_secs,
                )))
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
