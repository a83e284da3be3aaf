use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// A job posting as read from the `jobs` table. Owned and written by the CRUD
/// layer; the matching engine consumes it read-only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPosting {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Comma-separated required skill names (duplicates and mixed case allowed).
    pub skills_required: String,
    /// Required years of experience.
    pub experience_required: i32,
    /// Precomputed dense vector, if the embedding pipeline has run for this job.
    pub embedding: Option<Json<Vec<f32>>>,
    pub posted_at: DateTime<Utc>,
}

impl JobPosting {
    /// The text a candidate résumé is compared against: title, description and
    /// required skills joined into one document.
    pub fn full_text(&self) -> String {
        [
            self.title.as_str(),
            self.description.as_str(),
            self.skills_required.as_str(),
        ]
        .iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" ")
    }

    pub fn embedding_slice(&self) -> Option<&[f32]> {
        self.embedding.as_ref().map(|j| j.0.as_slice())
    }
}
