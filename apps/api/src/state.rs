use std::sync::Arc;

use sqlx::PgPool;

use crate::embedder::EmbeddingProvider;
use crate::matching::ranker::MatchRanker;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Ranking orchestrator. Owns the cache and extractor collaborators,
    /// constructed once per process.
    pub ranker: Arc<MatchRanker>,
    /// Embedding provider for the backfill path. `DisabledEmbedder` unless
    /// EMBEDDING_API_URL is configured; never used while ranking.
    pub embedder: Arc<dyn EmbeddingProvider>,
}
