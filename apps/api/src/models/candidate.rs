use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// A candidate résumé row, joined with its owner's username. Written by the
/// upload/CRUD layer; read-only here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    /// Comma-separated declared skills. May be empty for raw uploads.
    pub skills: String,
    /// Résumé body text, if the extraction pipeline has run.
    pub extracted_text: Option<String>,
    /// Storage reference for the uploaded résumé file.
    pub file_key: Option<String>,
    /// Years of experience; may be fractional. `None` when never recorded.
    pub experience: Option<f64>,
    /// Precomputed dense vector, same dimensionality convention as job embeddings.
    pub embedding: Option<Json<Vec<f32>>>,
    pub uploaded_at: DateTime<Utc>,
}

impl CandidateProfile {
    pub fn embedding_slice(&self) -> Option<&[f32]> {
        self.embedding.as_ref().map(|j| j.0.as_slice())
    }
}
