//! Embedding provider — the single point of contact with the embedding
//! service.
//!
//! The ranking path never calls this: embeddings are consumed only when
//! already materialized on job/candidate rows. The provider exists for the
//! maintenance path that backfills missing vectors, and "no embedding
//! available" is a valid, expected response, not an error.

use async_trait::async_trait;
use axum::extract::State;
use axum::Json;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::db;
use crate::errors::AppError;
use crate::state::AppState;

#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds the text, or returns `None` when no embedding is available.
    async fn embed(&self, text: &str) -> Option<Vec<f32>>;
}

/// Provider for deployments without an embedding service (free tier).
/// Every request answers "unavailable".
pub struct DisabledEmbedder;

#[async_trait]
impl EmbeddingProvider for DisabledEmbedder {
    async fn embed(&self, _text: &str) -> Option<Vec<f32>> {
        None
    }
}

/// HTTP-backed provider: `POST {url}` with `{"text": ...}`, expecting
/// `{"embedding": [f32, ...]}`. Any failure is logged and reported as
/// unavailable.
pub struct HttpEmbedder {
    client: Client,
    url: String,
}

impl HttpEmbedder {
    pub fn new(url: String) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingProvider for HttpEmbedder {
    async fn embed(&self, text: &str) -> Option<Vec<f32>> {
        let response = match self
            .client
            .post(&self.url)
            .json(&EmbedRequest { text })
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!("Embedding request failed: {e}");
                return None;
            }
        };
        if !response.status().is_success() {
            warn!("Embedding service returned status {}", response.status());
            return None;
        }
        match response.json::<EmbedResponse>().await {
            Ok(body) if !body.embedding.is_empty() => Some(body.embedding),
            Ok(_) => {
                warn!("Embedding service returned an empty vector");
                None
            }
            Err(e) => {
                warn!("Embedding response parse failed: {e}");
                None
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecomputeReport {
    pub jobs_updated: u64,
    pub resumes_updated: u64,
}

/// POST /api/v1/admin/embeddings/recompute
///
/// Backfills embeddings for every job and résumé that lacks one, then
/// invalidates all cached rankings — a new résumé vector changes every job's
/// ordering. With the disabled provider this reports zero updates.
pub async fn handle_recompute_embeddings(
    State(state): State<AppState>,
) -> Result<Json<RecomputeReport>, AppError> {
    let mut jobs_updated = 0;
    for job in db::jobs_missing_embedding(&state.db).await? {
        if let Some(vector) = state.embedder.embed(&job.full_text()).await {
            db::store_job_embedding(&state.db, job.id, &vector).await?;
            jobs_updated += 1;
        }
    }

    let mut resumes_updated = 0;
    for candidate in db::candidates_missing_embedding(&state.db).await? {
        let text = candidate
            .extracted_text
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| candidate.skills.clone());
        if text.trim().is_empty() {
            continue;
        }
        if let Some(vector) = state.embedder.embed(&text).await {
            db::store_resume_embedding(&state.db, candidate.id, &vector).await?;
            resumes_updated += 1;
        }
    }

    if jobs_updated > 0 || resumes_updated > 0 {
        for job_id in db::list_job_ids(&state.db).await? {
            state.ranker.invalidate(job_id).await;
        }
    }

    info!("Embedding recompute: {jobs_updated} jobs, {resumes_updated} resumes");
    Ok(Json(RecomputeReport {
        jobs_updated,
        resumes_updated,
    }))
}
