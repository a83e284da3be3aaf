//! Postgres access: pool construction plus the read-only queries the
//! matching engine needs. The embedding backfill writes are the only
//! mutations in this service; all CRUD lives elsewhere.

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::{CandidateProfile, JobPosting};

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

const JOB_COLUMNS: &str =
    "id, title, description, skills_required, experience_required, embedding, posted_at";

const CANDIDATE_SELECT: &str = "SELECT r.id, r.user_id, u.username, r.skills, r.extracted_text, \
     r.file_key, r.experience, r.embedding, r.uploaded_at \
     FROM resumes r JOIN users u ON u.id = r.user_id";

pub async fn fetch_job(pool: &PgPool, job_id: Uuid) -> Result<Option<JobPosting>, sqlx::Error> {
    sqlx::query_as::<_, JobPosting>(&format!(
        "SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"
    ))
    .bind(job_id)
    .fetch_optional(pool)
    .await
}

/// Every candidate profile, with its owner's username. The ranking pass
/// iterates the whole pool; filtering belongs to the CRUD layer.
pub async fn list_candidates(pool: &PgPool) -> Result<Vec<CandidateProfile>, sqlx::Error> {
    sqlx::query_as::<_, CandidateProfile>(&format!("{CANDIDATE_SELECT} ORDER BY r.id"))
        .fetch_all(pool)
        .await
}

pub async fn list_job_ids(pool: &PgPool) -> Result<Vec<Uuid>, sqlx::Error> {
    let rows: Vec<(Uuid,)> = sqlx::query_as("SELECT id FROM jobs")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

pub async fn jobs_missing_embedding(pool: &PgPool) -> Result<Vec<JobPosting>, sqlx::Error> {
    sqlx::query_as::<_, JobPosting>(&format!(
        "SELECT {JOB_COLUMNS} FROM jobs WHERE embedding IS NULL"
    ))
    .fetch_all(pool)
    .await
}

pub async fn candidates_missing_embedding(
    pool: &PgPool,
) -> Result<Vec<CandidateProfile>, sqlx::Error> {
    sqlx::query_as::<_, CandidateProfile>(&format!(
        "{CANDIDATE_SELECT} WHERE r.embedding IS NULL"
    ))
    .fetch_all(pool)
    .await
}

pub async fn store_job_embedding(
    pool: &PgPool,
    job_id: Uuid,
    vector: &[f32],
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE jobs SET embedding = $1 WHERE id = $2")
        .bind(Json(vector.to_vec()))
        .bind(job_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn store_resume_embedding(
    pool: &PgPool,
    resume_id: Uuid,
    vector: &[f32],
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE resumes SET embedding = $1 WHERE id = $2")
        .bind(Json(vector.to_vec()))
        .bind(resume_id)
        .execute(pool)
        .await?;
    Ok(())
}
