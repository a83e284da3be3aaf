//! Lexical similarity: pairwise TF-IDF cosine over unigrams and bigrams.
//!
//! The vector space is restricted to the two documents being compared, so no
//! persistent vocabulary or corpus statistics are needed. IDF uses the
//! smoothed form `ln((N+1)/(df+1)) + 1` with N=2, matching the weighting of
//! the (tiny) two-document corpus. Degenerate inputs fall back to a raw
//! word-set Jaccard overlap instead of a hard zero.

use std::collections::BTreeMap;

use crate::matching::keyword::token_jaccard;
use crate::matching::text::tokenize;

/// TF-IDF cosine similarity of two texts, in `[0,1]`.
///
/// If either side produces no usable tokens, returns the word-set Jaccard
/// overlap of the raw texts. Numerical instability (zero-norm vectors, NaN)
/// collapses to 0.0 rather than propagating.
pub fn lexical_similarity(job_text: &str, candidate_text: &str) -> f64 {
    let job_terms = terms(&tokenize(job_text));
    let candidate_terms = terms(&tokenize(candidate_text));
    if job_terms.is_empty() || candidate_terms.is_empty() {
        return token_jaccard(job_text, candidate_text);
    }

    let idf = pairwise_idf(&job_terms, &candidate_terms);
    let job_vec = tfidf_vector(&job_terms, &idf);
    let candidate_vec = tfidf_vector(&candidate_terms, &idf);

    let sim = sparse_cosine(&job_vec, &candidate_vec);
    if sim.is_finite() {
        sim.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Unigrams plus adjacent bigrams (joined with a space) of a token sequence.
fn terms(tokens: &[String]) -> Vec<String> {
    let mut out: Vec<String> = tokens.to_vec();
    out.extend(tokens.windows(2).map(|w| format!("{} {}", w[0], w[1])));
    out
}

/// Smoothed IDF over a two-document corpus: `ln((N+1)/(df+1)) + 1`, N=2.
fn pairwise_idf(a: &[String], b: &[String]) -> BTreeMap<String, f64> {
    let mut df: BTreeMap<String, u32> = BTreeMap::new();
    for doc in [a, b] {
        let mut seen: Vec<&String> = doc.iter().collect();
        seen.sort();
        seen.dedup();
        for term in seen {
            *df.entry(term.clone()).or_insert(0) += 1;
        }
    }
    df.into_iter()
        .map(|(term, count)| (term, (3.0 / (count as f64 + 1.0)).ln() + 1.0))
        .collect()
}

/// Length-normalized term frequency times IDF, as a sparse vector.
fn tfidf_vector(doc_terms: &[String], idf: &BTreeMap<String, f64>) -> BTreeMap<String, f64> {
    let len = doc_terms.len() as f64;
    let mut tf: BTreeMap<&String, f64> = BTreeMap::new();
    for term in doc_terms {
        *tf.entry(term).or_insert(0.0) += 1.0;
    }
    tf.into_iter()
        .map(|(term, count)| {
            let weight = (count / len) * idf.get(term).copied().unwrap_or(0.0);
            (term.clone(), weight)
        })
        .collect()
}

fn sparse_cosine(a: &BTreeMap<String, f64>, b: &BTreeMap<String, f64>) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(term, wa)| b.get(term).map(|wb| wa * wb))
        .sum();
    let norm_a: f64 = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b: f64 = b.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
