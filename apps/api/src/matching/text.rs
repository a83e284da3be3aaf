//! Text normalization shared by the lexical and keyword scorers.
//!
//! Lowercases, strips everything outside `[a-z0-9+#]` (keeping `+` and `#`
//! so skill tokens like `c++` and `c#` survive), collapses whitespace, and
//! tokenizes with a small English stopword set.

/// Common English function words dropped during tokenization.
const STOPWORDS: [&str; 25] = [
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "in", "is", "it", "its",
    "of", "on", "or", "that", "the", "to", "was", "were", "will", "with",
];

/// Lowercases and replaces any character outside `[a-z0-9+#]` with a space,
/// then collapses runs of whitespace and trims. Empty input yields `""`.
pub fn normalize(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '+' || c == '#' {
                c
            } else {
                ' '
            }
        })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits normalized text into tokens, dropping single-character tokens and
/// stopwords. Order is preserved; duplicates are kept.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .filter(|t| t.len() > 1 && !STOPWORDS.contains(t))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_strips_punctuation() {
        assert_eq!(normalize("Hello, World!"), "hello world");
    }

    #[test]
    fn test_normalize_preserves_skill_symbols() {
        assert_eq!(normalize("C++ and C# (senior)"), "c++ and c# senior");
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  python \t\n django  "), "python django");
    }

    #[test]
    fn test_normalize_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   .,;!  "), "");
    }

    #[test]
    fn test_tokenize_drops_stopwords() {
        assert_eq!(
            tokenize("experience with Python and Django"),
            vec!["experience", "python", "django"]
        );
    }

    #[test]
    fn test_tokenize_drops_single_char_tokens() {
        // "r" survives normalization but is too short to be a token
        assert_eq!(tokenize("r python"), vec!["python"]);
    }

    #[test]
    fn test_tokenize_keeps_c_sharp() {
        assert_eq!(tokenize("C# developer"), vec!["c#", "developer"]);
    }

    #[test]
    fn test_tokenize_empty_yields_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("the a an").is_empty());
    }

    #[test]
    fn test_tokenize_preserves_order_and_duplicates() {
        assert_eq!(
            tokenize("python django python"),
            vec!["python", "django", "python"]
        );
    }
}
