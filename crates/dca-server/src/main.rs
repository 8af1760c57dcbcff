//! dca-server HTTP Server
//!
//! Axum-based server exposing DCA backtests over REST.
//!
//! Price history comes from the feed chosen by `PRICE_FEED`, wrapped in a
//! request cache (persisted to `PRICE_CACHE_DIR` when set).

mod config;
mod handlers;
mod state;

use std::sync::Arc;

use axum::{routing::{get, post}, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dca_engine::feed::{CachedPriceFeed, JsonFilePriceFeed, MockPriceFeed, PriceFeed};

use crate::config::{FeedKind, ServerConfig};
use crate::handlers::{health_check, prices_handler, simulate_handler};
use crate::state::AppState;

fn cached<F: PriceFeed + 'static>(feed: F, config: &ServerConfig) -> Arc<dyn PriceFeed> {
    let cached = CachedPriceFeed::new(feed);
    match &config.cache_dir {
        Some(dir) => Arc::new(cached.with_cache_dir(dir)),
        None => Arc::new(cached),
    }
}

fn build_feed(config: &ServerConfig) -> Arc<dyn PriceFeed> {
    match &config.feed {
        FeedKind::Mock => cached(MockPriceFeed::new(), config),
        FeedKind::File(dir) => cached(JsonFilePriceFeed::new(dir), config),
    }
}

/// Routes and middleware
fn app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/simulate", post(simulate_handler))
        .route("/api/prices/{symbol}", get(prices_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,dca_engine=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();
    let config = ServerConfig::from_env()?;

    let feed = build_feed(&config);
    match &config.feed {
        FeedKind::Mock => tracing::warn!("⚠ Using synthetic mock prices (set PRICE_FEED=file for real data)"),
        FeedKind::File(dir) => tracing::info!("✓ Reading price files from {}", dir.display()),
    }
    if let Some(dir) = &config.cache_dir {
        tracing::info!("✓ Caching price history in {}", dir.display());
    }

    let app = app(AppState::new(feed));

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 dca-server running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                 - Health check");
    tracing::info!("  POST /api/simulate           - Run a DCA backtest");
    tracing::info!("  GET  /api/prices/{{symbol}}    - Price history (?start=&end=)");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
