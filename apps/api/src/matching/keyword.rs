//! Skill-set overlap scoring.
//!
//! Both sides are reduced to normalized token sets; the base score is the
//! share of the job's required tokens the candidate covers. Boost keywords
//! grant up to +0.5 extra credit scaled by their own match ratio.

use std::collections::BTreeSet;

use crate::matching::text::{normalize, tokenize};

/// Maximum extra credit granted by boost keywords.
const BOOST_CREDIT: f64 = 0.5;

/// Normalized token set for a comma-separated (or free-form) skills string.
/// BTreeSet keeps later set differences deterministically sorted.
pub fn skill_set(text: &str) -> BTreeSet<String> {
    tokenize(text).into_iter().collect()
}

/// Overlap of the job's required skill tokens covered by the candidate,
/// in `[0,1]`. An empty job-side set scores 0.0 (nothing to evaluate against).
///
/// `boost_keywords` add up to [`BOOST_CREDIT`] extra, scaled by how many of
/// them the candidate covers; the total is clamped to `[0,1]`.
pub fn keyword_overlap(
    job_skills_text: &str,
    candidate_skills_text: &str,
    boost_keywords: &[&str],
) -> f64 {
    let job = skill_set(job_skills_text);
    if job.is_empty() {
        return 0.0;
    }
    let candidate = skill_set(candidate_skills_text);

    let matched = job.intersection(&candidate).count();
    let mut score = matched as f64 / job.len() as f64;

    if !boost_keywords.is_empty() {
        let boost: BTreeSet<String> = boost_keywords.iter().flat_map(|k| tokenize(k)).collect();
        if !boost.is_empty() {
            let boost_matched = boost.intersection(&candidate).count();
            score += BOOST_CREDIT * boost_matched as f64 / boost.len() as f64;
        }
    }

    score.clamp(0.0, 1.0)
}

/// Jaccard overlap of the raw normalized word sets of two texts, in `[0,1]`.
/// Used by the lexical scorer as its degenerate-input fallback, where the
/// words themselves stand in for declared skills (no stopword or length
/// filtering, so very short documents still get credit).
pub fn token_jaccard(a: &str, b: &str) -> f64 {
    let ta: BTreeSet<String> = normalize(a).split_whitespace().map(str::to_string).collect();
    let tb: BTreeSet<String> = normalize(b).split_whitespace().map(str::to_string).collect();
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }
    let inter = ta.intersection(&tb).count();
    let union = ta.union(&tb).count();
    inter as f64 / union as f64
}

/// Required job skills the candidate does not declare, sorted ascending.
pub fn missing_skills(job_skills_text: &str, candidate_skills_text: &str) -> Vec<String> {
    let job = skill_set(job_skills_text);
    let candidate = skill_set(candidate_skills_text);
    job.difference(&candidate).cloned().collect()
}
