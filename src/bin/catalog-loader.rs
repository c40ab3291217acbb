//! Seeds the Redis catalog snapshot read by the product resolution pipeline.
//!
//! Waits for Redis to accept connections, then stores the contents of a JSON
//! array file under the catalog key. An existing snapshot is left untouched
//! unless `--force` is given.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, anyhow, bail};
use clap::Parser;
use redis::AsyncCommands;
use redis::aio::MultiplexedConnection;
use tracing_subscriber::EnvFilter;

use wishlist_service::cache::snapshot::snapshot_len;
use wishlist_service::config::ServiceConfig;

const CONNECT_ATTEMPTS: u32 = 30;
const CONNECT_BACKOFF: Duration = Duration::from_secs(1);

#[derive(Debug, Parser)]
#[command(name = "catalog-loader")]
#[command(about = "Load the product catalog snapshot into Redis", long_about = None)]
struct Cli {
    /// JSON array of products to load.
    #[arg(short, long, default_value = "mock_products.json")]
    file: PathBuf,

    /// Redis key to write (defaults to CATALOG_KEY).
    #[arg(short, long)]
    key: Option<String>,

    /// Redis URL (defaults to REDIS_URL or REDIS_HOST/REDIS_PORT/REDIS_DB).
    #[arg(long)]
    redis_url: Option<String>,

    /// Overwrite an existing snapshot.
    #[arg(long)]
    force: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = ServiceConfig::from_env().map_err(|e| anyhow!("invalid configuration: {e}"))?;
    let key = cli.key.unwrap_or(config.catalog_key);
    let url = cli.redis_url.unwrap_or(config.redis_url);

    let mut conn = connect(&url).await?;

    let exists: bool = conn.exists(&key).await?;
    if exists && !cli.force {
        let raw: String = conn.get(&key).await?;
        match snapshot_len(&raw) {
            Ok(len) => tracing::info!(%key, products = len, "catalog already loaded, skipping"),
            Err(e) => tracing::warn!(%key, error = %e, "existing catalog is not a JSON array, skipping"),
        }
        return Ok(());
    }

    let raw = tokio::fs::read_to_string(&cli.file)
        .await
        .with_context(|| format!("reading {}", cli.file.display()))?;
    let len = snapshot_len(&raw).with_context(|| format!("validating {}", cli.file.display()))?;

    let _: () = conn.set(&key, raw).await?;
    tracing::info!(%key, products = len, file = %cli.file.display(), "catalog loaded");
    Ok(())
}

/// Connects and pings, retrying while Redis is still starting.
async fn connect(url: &str) -> anyhow::Result<MultiplexedConnection> {
    let client = redis::Client::open(url).with_context(|| format!("invalid redis url {url}"))?;

    for attempt in 1..=CONNECT_ATTEMPTS {
        match try_connect(&client).await {
            Ok(conn) => {
                tracing::info!(attempt, "connected to redis");
                return Ok(conn);
            }
            Err(e) => {
                tracing::warn!(attempt, max = CONNECT_ATTEMPTS, error = %e, "redis not available yet");
                tokio::time::sleep(CONNECT_BACKOFF).await;
            }
        }
    }

    bail!("could not connect to redis after {CONNECT_ATTEMPTS} attempts")
}

async fn try_connect(client: &redis::Client) -> redis::RedisResult<MultiplexedConnection> {
    let mut conn = client.get_multiplexed_async_connection().await?;
    let _: String = redis::cmd("PING").query_async(&mut conn).await?;
    Ok(conn)
}
