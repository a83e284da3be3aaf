//! Ranking orchestration: score every candidate against one job, sort,
//! cache, and serve paginated slices.
//!
//! Scoring a single pair is pure and infallible — a degraded sub-signal
//! contributes 0 (or is absent, for embeddings) instead of aborting the
//! batch. The only request-level failure is an unresolvable job, handled
//! upstream of this module.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::cache::RankingCache;
use crate::extract::{self, TextExtractor};
use crate::matching::combine::{combine, round2};
use crate::matching::embedding::EmbeddingSignal;
use crate::matching::experience::experience_fit;
use crate::matching::keyword::{keyword_overlap, missing_skills};
use crate::matching::lexical::lexical_similarity;
use crate::models::{CandidateProfile, JobPosting};

/// Per-candidate output of one ranking pass. Sub-scores are percentages;
/// `final_score` is the blended 0–100 value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub resume_id: Uuid,
    pub user: String,
    pub skills: String,
    pub experience: f64,
    pub embedding_pct: Option<f64>,
    pub lexical_pct: f64,
    pub keyword_pct: f64,
    /// Experience fit in [0,1]; feeds the combiner, not the wire response.
    pub experience_fit: f64,
    pub final_score: f64,
    pub missing_skills: Vec<String>,
}

/// One page of a ranked result set.
#[derive(Debug, Clone, Serialize)]
pub struct RankedPage {
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
    pub results: Vec<MatchResult>,
}

/// Orchestrates scoring across all candidates for one job.
///
/// Holds its collaborators explicitly: the ranking cache and the text
/// extractor are injected at construction, once per process.
pub struct MatchRanker {
    cache: Arc<dyn RankingCache>,
    extractor: Arc<dyn TextExtractor>,
    cache_ttl: Duration,
}

impl MatchRanker {
    pub fn new(
        cache: Arc<dyn RankingCache>,
        extractor: Arc<dyn TextExtractor>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            cache,
            extractor,
            cache_ttl,
        }
    }

    /// Ranks `candidates` against `job` and returns the requested page.
    ///
    /// A fresh cached ranking for the job is served as-is (re-paginated);
    /// otherwise every candidate is scored, the full ordering is cached with
    /// the configured TTL, and the slice is returned. Out-of-range pages
    /// yield an empty result list, not an error.
    pub async fn rank(
        &self,
        job: &JobPosting,
        candidates: &[CandidateProfile],
        page: u32,
        page_size: u32,
    ) -> RankedPage {
        if let Some(cached) = self.cache.get(job.id).await {
            debug!("Serving cached ranking for job {}", job.id);
            return paginate(cached, page, page_size);
        }

        let job_text = job.full_text();
        let mut results: Vec<MatchResult> = candidates
            .iter()
            .map(|candidate| self.score_candidate(job, &job_text, candidate))
            .collect();

        // final_score descending, candidate id ascending on ties. Scores are
        // clamped upstream, so the partial ordering is total here.
        results.sort_by(|a, b| {
            b.final_score
                .partial_cmp(&a.final_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.resume_id.cmp(&b.resume_id))
        });

        self.cache.set(job.id, &results, self.cache_ttl).await;
        paginate(results, page, page_size)
    }

    /// Drops the cached ranking for a job. Wired to job/profile mutation
    /// events by external collaborators.
    pub async fn invalidate(&self, job_id: Uuid) {
        self.cache.invalidate(job_id).await;
    }

    fn score_candidate(
        &self,
        job: &JobPosting,
        job_text: &str,
        candidate: &CandidateProfile,
    ) -> MatchResult {
        let body = self.resolve_body_text(candidate);
        let skills_text = declared_or_detected_skills(candidate, &body);
        let years = candidate
            .experience
            .or_else(|| extract::parse_experience_years(&body))
            .unwrap_or(0.0);

        let keyword = keyword_overlap(&job.skills_required, &skills_text, &[]);
        let lexical = lexical_similarity(job_text, &body);
        let exp_fit = experience_fit(job.experience_required as f64, years);
        let embedding = EmbeddingSignal::resolve(job.embedding_slice(), candidate.embedding_slice());

        let final_score = combine(lexical, keyword, exp_fit, &embedding);

        MatchResult {
            resume_id: candidate.id,
            user: candidate.username.clone(),
            skills: skills_text.clone(),
            experience: years,
            embedding_pct: embedding.value().map(|v| round2(v * 100.0)),
            lexical_pct: round2(lexical * 100.0),
            keyword_pct: round2(keyword * 100.0),
            experience_fit: exp_fit,
            final_score,
            missing_skills: missing_skills(&job.skills_required, &skills_text),
        }
    }

    /// Scoring text for a candidate: stored body, then on-demand extraction,
    /// then the declared skills string. Empty if nothing is available.
    fn resolve_body_text(&self, candidate: &CandidateProfile) -> String {
        if let Some(text) = candidate.extracted_text.as_deref() {
            if !text.trim().is_empty() {
                return text.to_string();
            }
        }
        if let Some(file_key) = candidate.file_key.as_deref() {
            let extracted = self.extractor.extract(file_key);
            if !extracted.trim().is_empty() {
                return extracted;
            }
            debug!("No text extracted for resume {}", candidate.id);
        }
        candidate.skills.clone()
    }
}

/// Declared skills, or the known-skill scan of the body for raw uploads.
fn declared_or_detected_skills(candidate: &CandidateProfile, body: &str) -> String {
    if !candidate.skills.trim().is_empty() {
        return candidate.skills.clone();
    }
    extract::detect_known_skills(body).join(", ")
}

/// Pure slice of a sorted sequence: `results[(page-1)*size .. page*size]`.
/// `page` and `page_size` are floored at 1; pages past the end are empty.
fn paginate(results: Vec<MatchResult>, page: u32, page_size: u32) -> RankedPage {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let total = results.len();
    let start = (page as usize - 1).saturating_mul(page_size as usize);
    let slice = if start >= total {
        Vec::new()
    } else {
        results[start..(start + page_size as usize).min(total)].to_vec()
    };
    RankedPage {
        total,
        page,
        page_size,
        results: slice,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryRankingCache;
    use crate::extract::NullExtractor;
    use chrono::Utc;
    use sqlx::types::Json;

    fn ranker() -> MatchRanker {
        MatchRanker::new(
            Arc::new(MemoryRankingCache::new()),
            Arc::new(NullExtractor),
            Duration::from_secs(300),
        )
    }

    fn job(skills: &str, description: &str, experience_required: i32) -> JobPosting {
        JobPosting {
            id: Uuid::new_v4(),
            title: "Backend Engineer".to_string(),
            description: description.to_string(),
            skills_required: skills.to_string(),
            experience_required,
            embedding: None,
            posted_at: Utc::now(),
        }
    }

    fn candidate(id: u128, skills: &str, body: &str, experience: Option<f64>) -> CandidateProfile {
        CandidateProfile {
            id: Uuid::from_u128(id),
            user_id: Uuid::new_v4(),
            username: format!("user{id}"),
            skills: skills.to_string(),
            extracted_text: if body.is_empty() {
                None
            } else {
                Some(body.to_string())
            },
            file_key: None,
            experience,
            embedding: None,
            uploaded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_scores_are_bounded() {
        let r = ranker();
        let j = job("python,django", "Build web services in Python", 5);
        let candidates = vec![
            candidate(1, "python,flask", "Python developer, 2 years", Some(2.0)),
            candidate(2, "", "", None),
            candidate(3, "python,django,aws", "Senior Django developer, 8 years", Some(8.0)),
        ];
        let page = r.rank(&j, &candidates, 1, 20).await;
        for result in &page.results {
            assert!((0.0..=100.0).contains(&result.final_score));
        }
    }

    #[tokio::test]
    async fn test_better_match_ranks_higher() {
        let r = ranker();
        let j = job("python,django", "Build Django web services in Python", 3);
        let weak = candidate(1, "java", "Java enterprise developer", Some(1.0));
        let strong = candidate(2, "python,django", "Python and Django web services", Some(5.0));
        let page = r.rank(&j, &[weak, strong], 1, 20).await;
        assert_eq!(page.results[0].user, "user2");
        assert!(page.results[0].final_score > page.results[1].final_score);
    }

    #[tokio::test]
    async fn test_equal_scores_tie_break_by_id_ascending() {
        let r = ranker();
        let j = job("python", "Python role", 0);
        // identical inputs ⇒ identical scores; ids differ
        let a = candidate(7, "python", "python", Some(1.0));
        let b = candidate(2, "python", "python", Some(1.0));
        let page = r.rank(&j, &[a, b], 1, 20).await;
        assert_eq!(page.results[0].final_score, page.results[1].final_score);
        assert_eq!(page.results[0].resume_id, Uuid::from_u128(2));
        assert_eq!(page.results[1].resume_id, Uuid::from_u128(7));
    }

    #[tokio::test]
    async fn test_determinism_without_cache() {
        let j = job("python,django", "Build web services", 4);
        let candidates: Vec<_> = (1..=5)
            .map(|i| candidate(i, "python", "Python developer, 3 years", Some(i as f64)))
            .collect();

        let first = ranker().rank(&j, &candidates, 1, 20).await;
        let second = ranker().rank(&j, &candidates, 1, 20).await;
        assert_eq!(first.results, second.results);
    }

    #[tokio::test]
    async fn test_pagination_slices() {
        let r = ranker();
        let j = job("python", "Python role", 0);
        let candidates: Vec<_> = (1..=5)
            .map(|i| candidate(i, "python", "python developer", Some(1.0)))
            .collect();

        let p1 = r.rank(&j, &candidates, 1, 2).await;
        let p2 = r.rank(&j, &candidates, 2, 2).await;
        let p3 = r.rank(&j, &candidates, 3, 2).await;
        let p4 = r.rank(&j, &candidates, 4, 2).await;

        assert_eq!(p1.results.len(), 2);
        assert_eq!(p2.results.len(), 2);
        assert_eq!(p3.results.len(), 1);
        assert!(p4.results.is_empty());
        assert_eq!(p1.total, 5);
        assert_eq!(p4.total, 5);
    }

    #[tokio::test]
    async fn test_cached_ranking_is_reused_verbatim() {
        let cache = Arc::new(MemoryRankingCache::new());
        let r = MatchRanker::new(cache, Arc::new(NullExtractor), Duration::from_secs(300));
        let j = job("python,django", "Build web services", 3);
        let candidates = vec![
            candidate(1, "python", "Python, 2 years", Some(2.0)),
            candidate(2, "python,django", "Django, 5 years", Some(5.0)),
        ];

        let first = r.rank(&j, &candidates, 1, 20).await;
        // mutate inputs without invalidating: cached ordering must still serve
        let second = r.rank(&j, &[], 1, 20).await;
        assert_eq!(first.results, second.results);
        assert_eq!(second.total, 2);

        r.invalidate(j.id).await;
        let third = r.rank(&j, &[], 1, 20).await;
        assert_eq!(third.total, 0);
    }

    #[tokio::test]
    async fn test_missing_skills_and_concrete_overlap() {
        let r = ranker();
        let j = job("python,django", "Web role", 0);
        let c = candidate(1, "python,flask", "python flask developer", Some(1.0));
        let page = r.rank(&j, &[c], 1, 20).await;
        let result = &page.results[0];
        assert_eq!(result.keyword_pct, 50.0);
        assert_eq!(result.missing_skills, vec!["django".to_string()]);
    }

    #[tokio::test]
    async fn test_experience_shortfall_partial_credit() {
        let r = ranker();
        let j = job("python", "Python role", 5);
        let c = candidate(1, "python", "python developer", Some(2.0));
        let page = r.rank(&j, &[c], 1, 20).await;
        assert!((page.results[0].experience_fit - 0.4).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_degenerate_job_does_not_panic() {
        let r = ranker();
        let mut j = job("", "", 0);
        j.title = String::new();
        let c = candidate(1, "python", "python developer", Some(3.0));
        let page = r.rank(&j, &[c], 1, 20).await;
        let result = &page.results[0];
        assert_eq!(result.keyword_pct, 0.0);
        assert!((0.0..=100.0).contains(&result.final_score));
    }

    #[tokio::test]
    async fn test_embedding_branch_used_when_both_present() {
        let r = ranker();
        let mut j = job("python", "Python role", 0);
        j.embedding = Some(Json(vec![1.0, 0.0]));
        let mut c = candidate(1, "python", "python developer", Some(1.0));
        c.embedding = Some(Json(vec![1.0, 0.0]));
        let page = r.rank(&j, &[c], 1, 20).await;
        assert_eq!(page.results[0].embedding_pct, Some(100.0));
    }

    #[tokio::test]
    async fn test_mismatched_embedding_degrades_to_absent() {
        let r = ranker();
        let mut j = job("python", "Python role", 0);
        j.embedding = Some(Json(vec![1.0, 0.0]));
        let mut c = candidate(1, "python", "python developer", Some(1.0));
        c.embedding = Some(Json(vec![1.0, 0.0, 0.0])); // wrong dimensionality
        let page = r.rank(&j, &[c], 1, 20).await;
        assert_eq!(page.results[0].embedding_pct, None);
        assert!((0.0..=100.0).contains(&page.results[0].final_score));
    }

    #[tokio::test]
    async fn test_sparse_profile_falls_back_to_heuristics() {
        let r = ranker();
        let j = job("python,docker", "Python services in Docker", 4);
        // no declared skills, no recorded experience: both come from the body
        let c = candidate(1, "", "Built Python services with Docker, 6 years total", None);
        let page = r.rank(&j, &[c], 1, 20).await;
        let result = &page.results[0];
        assert_eq!(result.keyword_pct, 100.0);
        assert_eq!(result.experience, 6.0);
        assert_eq!(result.experience_fit, 1.0);
    }
}
