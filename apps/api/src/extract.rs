//! Text-side collaborators and résumé heuristics.
//!
//! File-to-text extraction is owned by an external service; this module only
//! defines the contract the ranker consumes. The parsing heuristics below
//! fill gaps in sparse profiles (no recorded experience, no declared skills)
//! from the résumé body itself.

use std::sync::OnceLock;

use regex::Regex;

use crate::matching::text::normalize;

/// Extraction contract. Implementations must never fail into the ranker:
/// any problem yields an empty string.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, file_reference: &str) -> String;
}

/// Extractor for deployments where extraction runs out-of-band and bodies
/// arrive pre-stored on the profile row.
pub struct NullExtractor;

impl TextExtractor for NullExtractor {
    fn extract(&self, _file_reference: &str) -> String {
        String::new()
    }
}

/// Well-known skill names scanned for when a profile declares none.
const KNOWN_SKILLS: [&str; 19] = [
    "Python",
    "Java",
    "C++",
    "Django",
    "Flask",
    "SQL",
    "MySQL",
    "PostgreSQL",
    "HTML",
    "CSS",
    "JavaScript",
    "React",
    "Node.js",
    "Machine Learning",
    "AI",
    "Data Science",
    "AWS",
    "Docker",
    "Git",
];

/// First "<n> years" (or "yrs") mention in the text, if any.
/// Tolerates "5+ years" and fractional values.
pub fn parse_experience_years(text: &str) -> Option<f64> {
    static YEARS_RE: OnceLock<Regex> = OnceLock::new();
    let re = YEARS_RE.get_or_init(|| {
        Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*\+?\s*(?:years?|yrs?)\b").expect("valid regex")
    });
    re.captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Known skills mentioned in the text, in [`KNOWN_SKILLS`] order.
/// Matching is case-insensitive on normalized whole words, so "C++" is found
/// but "scripted" does not match "script".
pub fn detect_known_skills(text: &str) -> Vec<String> {
    let padded = format!(" {} ", normalize(text));
    KNOWN_SKILLS
        .iter()
        .filter(|skill| padded.contains(&format!(" {} ", normalize(skill))))
        .map(|s| s.to_string())
        .collect()
}
