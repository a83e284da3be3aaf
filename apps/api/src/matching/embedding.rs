//! Dense-embedding similarity.
//!
//! The signal is modeled as a sum type: it is either present for a
//! (job, candidate) pair or absent, and absence selects a different blend in
//! the combiner. A zero-length or dimension-mismatched vector is never
//! "present but empty" — it is `Absent`.

/// The optional embedding signal for one (job, candidate) pair.
#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddingSignal {
    /// Both sides had non-empty vectors of matching dimensionality; the value
    /// is their cosine similarity floored to `[0,1]`.
    Present(f64),
    Absent,
}

impl EmbeddingSignal {
    /// Resolves the signal for a pair of optional vectors. Any missing,
    /// empty, or mismatched side yields `Absent`.
    pub fn resolve(job: Option<&[f32]>, candidate: Option<&[f32]>) -> Self {
        match (job, candidate) {
            (Some(j), Some(c)) if !j.is_empty() && j.len() == c.len() => {
                EmbeddingSignal::Present(cosine_clamped(j, c))
            }
            _ => EmbeddingSignal::Absent,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            EmbeddingSignal::Present(v) => Some(*v),
            EmbeddingSignal::Absent => None,
        }
    }
}

/// Cosine similarity clamped into `[0,1]`. Negative cosine (semantically
/// opposite) is floored to 0 — for ranking purposes it is no more useful than
/// "unrelated". Zero-norm vectors score 0.0.
fn cosine_clamped(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| *x as f64 * *y as f64).sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let sim = dot / (norm_a * norm_b);
    if sim.is_finite() {
        sim.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors_score_one() {
        let v = [0.1_f32, 0.5, -0.3];
        match EmbeddingSignal::resolve(Some(&v), Some(&v)) {
            EmbeddingSignal::Present(s) => assert!((s - 1.0).abs() < 1e-9),
            EmbeddingSignal::Absent => panic!("expected Present"),
        }
    }

    #[test]
    fn test_opposite_vectors_floored_to_zero() {
        let a = [1.0_f32, 0.0];
        let b = [-1.0_f32, 0.0];
        assert_eq!(
            EmbeddingSignal::resolve(Some(&a), Some(&b)),
            EmbeddingSignal::Present(0.0)
        );
    }

    #[test]
    fn test_orthogonal_vectors_score_zero() {
        let a = [1.0_f32, 0.0];
        let b = [0.0_f32, 1.0];
        assert_eq!(
            EmbeddingSignal::resolve(Some(&a), Some(&b)),
            EmbeddingSignal::Present(0.0)
        );
    }

    #[test]
    fn test_missing_side_is_absent() {
        let v = [1.0_f32];
        assert_eq!(EmbeddingSignal::resolve(None, Some(&v)), EmbeddingSignal::Absent);
        assert_eq!(EmbeddingSignal::resolve(Some(&v), None), EmbeddingSignal::Absent);
    }

    #[test]
    fn test_empty_vector_is_absent_not_zero() {
        let empty: [f32; 0] = [];
        let v = [1.0_f32];
        assert_eq!(
            EmbeddingSignal::resolve(Some(&empty), Some(&empty)),
            EmbeddingSignal::Absent
        );
        assert_eq!(
            EmbeddingSignal::resolve(Some(&empty), Some(&v)),
            EmbeddingSignal::Absent
        );
    }

    #[test]
    fn test_dimension_mismatch_is_absent() {
        let a = [1.0_f32, 2.0];
        let b = [1.0_f32, 2.0, 3.0];
        assert_eq!(EmbeddingSignal::resolve(Some(&a), Some(&b)), EmbeddingSignal::Absent);
    }

    #[test]
    fn test_zero_norm_vector_scores_zero() {
        let a = [0.0_f32, 0.0];
        let b = [1.0_f32, 1.0];
        assert_eq!(
            EmbeddingSignal::resolve(Some(&a), Some(&b)),
            EmbeddingSignal::Present(0.0)
        );
    }
}
