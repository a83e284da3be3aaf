//! Score combination: one canonical blending policy.
//!
//! Two fixed weight regimes, selected by whether the embedding signal is
//! present for the pair. The weights are documented constants, not learned.

use crate::matching::embedding::EmbeddingSignal;

/// Blend weights for one combination regime. Each regime must sum to 1.0 so
/// the final score stays within 0–100.
#[derive(Debug, Clone, Copy)]
pub struct BlendWeights {
    pub embedding: f64,
    pub lexical: f64,
    pub keyword: f64,
    pub experience: f64,
}

impl BlendWeights {
    pub fn sum(&self) -> f64 {
        self.embedding + self.lexical + self.keyword + self.experience
    }
}

/// Used when a dense embedding similarity is available for the pair.
pub const EMBEDDING_BLEND: BlendWeights = BlendWeights {
    embedding: 0.6,
    lexical: 0.2,
    keyword: 0.2,
    experience: 0.0,
};

/// Used when no embedding signal exists; experience takes its place.
pub const LEXICAL_BLEND: BlendWeights = BlendWeights {
    embedding: 0.0,
    lexical: 0.6,
    keyword: 0.3,
    experience: 0.1,
};

/// Blends the sub-scores (each in `[0,1]`) into a final score in `[0,100]`,
/// clamped and rounded to 2 decimal places.
pub fn combine(
    lexical: f64,
    keyword: f64,
    experience: f64,
    embedding: &EmbeddingSignal,
) -> f64 {
    let raw = match embedding {
        EmbeddingSignal::Present(emb) => {
            let w = EMBEDDING_BLEND;
            w.embedding * emb + w.lexical * lexical + w.keyword * keyword
        }
        EmbeddingSignal::Absent => {
            let w = LEXICAL_BLEND;
            w.lexical * lexical + w.keyword * keyword + w.experience * experience
        }
    };
    round2((raw * 100.0).clamp(0.0, 100.0))
}

/// Rounds to 2 decimal places (scores are percentages).
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_weights_sum_to_one() {
        assert!((EMBEDDING_BLEND.sum() - 1.0).abs() < 1e-9);
        assert!((LEXICAL_BLEND.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_lexical_regime_weighting() {
        // 0.6*0.5 + 0.3*0.5 + 0.1*0.4 = 0.49 → 49.0
        let score = combine(0.5, 0.5, 0.4, &EmbeddingSignal::Absent);
        assert!((score - 49.0).abs() < 1e-9, "score was {score}");
    }

    #[test]
    fn test_embedding_regime_weighting() {
        // 0.6*0.9 + 0.2*0.5 + 0.2*0.5 = 0.74 → 74.0; experience ignored
        let score = combine(0.5, 0.5, 0.0, &EmbeddingSignal::Present(0.9));
        assert!((score - 74.0).abs() < 1e-9, "score was {score}");
    }

    #[test]
    fn test_experience_only_counts_without_embedding() {
        let with_emb = combine(0.0, 0.0, 1.0, &EmbeddingSignal::Present(0.0));
        let without = combine(0.0, 0.0, 1.0, &EmbeddingSignal::Absent);
        assert_eq!(with_emb, 0.0);
        assert!((without - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_perfect_inputs_score_one_hundred() {
        assert_eq!(combine(1.0, 1.0, 1.0, &EmbeddingSignal::Absent), 100.0);
        assert_eq!(combine(1.0, 1.0, 0.0, &EmbeddingSignal::Present(1.0)), 100.0);
    }

    #[test]
    fn test_result_clamped_to_bounds() {
        // out-of-range sub-scores must not escape 0–100
        assert_eq!(combine(2.0, 2.0, 2.0, &EmbeddingSignal::Absent), 100.0);
        assert_eq!(combine(-1.0, -1.0, -1.0, &EmbeddingSignal::Absent), 0.0);
    }

    #[test]
    fn test_rounded_to_two_decimals() {
        let score = combine(0.333_333, 0.333_333, 0.333_333, &EmbeddingSignal::Absent);
        assert_eq!(score, 33.33);
    }
}
