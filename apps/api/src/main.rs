mod cache;
mod config;
mod db;
mod embedder;
mod errors;
mod extract;
mod matching;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cache::RedisRankingCache;
use crate::config::Config;
use crate::db::create_pool;
use crate::embedder::{DisabledEmbedder, EmbeddingProvider, HttpEmbedder};
use crate::extract::NullExtractor;
use crate::matching::ranker::MatchRanker;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (panics on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Match API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize Redis-backed ranking cache
    let redis = redis::Client::open(config.redis_url.clone())?;
    let ranking_cache = Arc::new(RedisRankingCache::new(redis));
    info!("Redis ranking cache initialized");

    // Ranking orchestrator. Extraction runs out-of-band, so the in-process
    // extractor is the null implementation.
    let ranker = Arc::new(MatchRanker::new(
        ranking_cache,
        Arc::new(NullExtractor),
        Duration::from_secs(config.match_cache_ttl_secs),
    ));
    info!(
        "Match ranker initialized (cache TTL: {}s)",
        config.match_cache_ttl_secs
    );

    // Embedding provider for the backfill path (disabled unless configured)
    let embedder: Arc<dyn EmbeddingProvider> = match &config.embedding_api_url {
        Some(url) => {
            info!("Embedding provider: HTTP ({url})");
            Arc::new(HttpEmbedder::new(url.clone()))
        }
        None => {
            info!("Embedding provider: disabled");
            Arc::new(DisabledEmbedder)
        }
    };

    // Build app state
    let state = AppState {
        db,
        ranker,
        embedder,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
