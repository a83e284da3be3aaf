// Matching engine: text normalization, the four sub-scorers, the score
// combiner, and the ranking/caching/pagination orchestrator.

pub mod combine;
pub mod embedding;
pub mod experience;
pub mod handlers;
pub mod keyword;
pub mod lexical;
pub mod ranker;
pub mod text;
