pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::embedder;
use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Match API
        .route(
            "/api/v1/jobs/:job_id/matches",
            get(handlers::handle_match_resumes),
        )
        .route(
            "/api/v1/jobs/:job_id/matches/invalidate",
            post(handlers::handle_invalidate_matches),
        )
        // Maintenance
        .route(
            "/api/v1/admin/embeddings/recompute",
            post(embedder::handle_recompute_embeddings),
        )
        .with_state(state)
}
