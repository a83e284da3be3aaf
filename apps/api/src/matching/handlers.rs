use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::matching::ranker::{MatchResult, RankedPage};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// One ranked candidate on the wire.
#[derive(Serialize)]
pub struct MatchedResume {
    pub resume_id: Uuid,
    pub user: String,
    pub skills: String,
    pub experience: f64,
    pub embedding_score: Option<f64>,
    pub tfidf_score: Option<f64>,
    pub skills_score: f64,
    pub score: f64,
    pub missing_skills: Vec<String>,
}

impl From<MatchResult> for MatchedResume {
    fn from(result: MatchResult) -> Self {
        MatchedResume {
            resume_id: result.resume_id,
            user: result.user,
            skills: result.skills,
            experience: result.experience,
            embedding_score: result.embedding_pct,
            tfidf_score: Some(result.lexical_pct),
            skills_score: result.keyword_pct,
            score: result.final_score,
            missing_skills: result.missing_skills,
        }
    }
}

#[derive(Serialize)]
pub struct MatchResponse {
    pub job_title: String,
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
    pub matched_resumes: Vec<MatchedResume>,
}

impl MatchResponse {
    fn new(job_title: String, page: RankedPage) -> Self {
        MatchResponse {
            job_title,
            total: page.total,
            page: page.page,
            page_size: page.page_size,
            matched_resumes: page.results.into_iter().map(MatchedResume::from).collect(),
        }
    }
}

/// GET /api/v1/jobs/:job_id/matches?page&page_size
///
/// Ranks the whole candidate pool against the job. The only failure mode is
/// an unknown job; data-quality problems degrade individual sub-scores
/// instead of failing the request.
pub async fn handle_match_resumes(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Query(params): Query<PageQuery>,
) -> Result<Json<MatchResponse>, AppError> {
    let job = db::fetch_job(&state.db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let candidates = db::list_candidates(&state.db).await?;
    let page = params.page.unwrap_or(1).max(1);
    let page_size = params.page_size.unwrap_or(20).max(1);

    let ranked = state.ranker.rank(&job, &candidates, page, page_size).await;
    Ok(Json(MatchResponse::new(job.title, ranked)))
}

/// POST /api/v1/jobs/:job_id/matches/invalidate
///
/// Explicit cache-invalidation hook for job/profile mutation events.
/// Idempotent: 204 whether or not an entry existed.
pub async fn handle_invalidate_matches(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> StatusCode {
    state.ranker.invalidate(job_id).await;
    StatusCode::NO_CONTENT
}
