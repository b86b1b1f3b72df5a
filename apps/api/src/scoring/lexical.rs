//! Lexical similarity: TF-IDF cosine over a two-document corpus.
//!
//! Weighting follows the usual vectorizer defaults so scores line up with
//! common tooling:
//! - terms are runs of two or more word characters, lowercased
//! - tf is the raw count
//! - idf is smoothed: `ln((1 + n) / (1 + df)) + 1`, with `n = 2`
//! - rows are L2-normalized, so the score is their cosine

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::scoring::{round2, ScoringError};

static TERM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("static regex"));

const CORPUS_SIZE: f64 = 2.0;

type TermCounts<'a> = BTreeMap<&'a str, f64>;

fn term_counts(text: &str) -> TermCounts<'_> {
    let mut counts = TermCounts::new();
    for m in TERM.find_iter(text) {
        *counts.entry(m.as_str()).or_insert(0.0) += 1.0;
    }
    counts
}

fn smoothed_idf(document_frequency: f64) -> f64 {
    ((1.0 + CORPUS_SIZE) / (1.0 + document_frequency)).ln() + 1.0
}

/// TF-IDF weights for one document given the other document of the corpus.
fn weigh<'a>(own: &TermCounts<'a>, other: &TermCounts<'_>) -> BTreeMap<&'a str, f64> {
    own.iter()
        .map(|(&term, &count)| {
            let df = if other.contains_key(term) { 2.0 } else { 1.0 };
            (term, count * smoothed_idf(df))
        })
        .collect()
}

fn norm(weights: &BTreeMap<&str, f64>) -> f64 {
    weights.values().map(|w| w * w).sum::<f64>().sqrt()
}

/// Cosine similarity of the TF-IDF vectors of `doc_a` and `doc_b`, scaled to a
/// percentage and rounded to two decimals.
///
/// Returns 0 when either document has no terms or the two share none. Fails
/// with [`ScoringError::Vectorization`] when neither document has any terms.
pub fn lexical_similarity(doc_a: &str, doc_b: &str) -> Result<f64, ScoringError> {
    let lower_a = doc_a.to_lowercase();
    let lower_b = doc_b.to_lowercase();
    let counts_a = term_counts(&lower_a);
    let counts_b = term_counts(&lower_b);

    if counts_a.is_empty() && counts_b.is_empty() {
        return Err(ScoringError::Vectorization(
            "empty vocabulary: neither document contains any terms".to_string(),
        ));
    }

    let weights_a = weigh(&counts_a, &counts_b);
    let weights_b = weigh(&counts_b, &counts_a);

    let norm_a = norm(&weights_a);
    let norm_b = norm(&weights_b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    // Both maps iterate in term order, so the dot product sums identically
    // whichever document comes first.
    let dot: f64 = weights_a
        .iter()
        .filter_map(|(term, wa)| weights_b.get(term).map(|wb| wa * wb))
        .sum();

    Ok(round2(dot / (norm_a * norm_b) * 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_documents_score_100() {
        let doc = "python developer with django and flask experience";
        assert_eq!(lexical_similarity(doc, doc).unwrap(), 100.0);
    }

    #[test]
    fn test_identical_single_term_scores_100() {
        assert_eq!(lexical_similarity("python", "python").unwrap(), 100.0);
    }

    #[test]
    fn test_disjoint_vocabulary_scores_zero() {
        let score = lexical_similarity("python django flask", "accountant ledger audit").unwrap();
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_one_empty_document_scores_zero() {
        assert_eq!(lexical_similarity("", "python developer").unwrap(), 0.0);
        assert_eq!(lexical_similarity("python developer", "").unwrap(), 0.0);
    }

    #[test]
    fn test_both_empty_is_vectorization_error() {
        let err = lexical_similarity("", "   ").unwrap_err();
        assert!(matches!(err, ScoringError::Vectorization(_)));
    }

    #[test]
    fn test_single_character_tokens_are_ignored() {
        // no term of length >= 2 on either side
        let err = lexical_similarity("a b c", "x y z").unwrap_err();
        assert!(matches!(err, ScoringError::Vectorization(_)));
    }

    #[test]
    fn test_symmetric() {
        let a = "python django experience building rest apis";
        let b = "python developer needed to build apis with django rest framework";
        assert_eq!(
            lexical_similarity(a, b).unwrap(),
            lexical_similarity(b, a).unwrap()
        );
    }

    #[test]
    fn test_partial_overlap_known_value() {
        // shared "python" (idf 1.0), unique "django" / "developer" (idf 1 + ln 1.5)
        // cos = 1 / (1 + (1 + ln 1.5)^2) ≈ 0.3361
        let score = lexical_similarity("python django", "python developer").unwrap();
        let unique = 1.0 + 1.5_f64.ln();
        let expected = round2(100.0 / (1.0 + unique * unique));
        assert_eq!(score, expected);
        assert!((score - 33.61).abs() < 0.01, "score was {score}");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            lexical_similarity("Python Developer", "python developer").unwrap(),
            100.0
        );
    }

    #[test]
    fn test_within_bounds() {
        let score = lexical_similarity(
            "rust tokio axum services",
            "we need a rust engineer for axum web services and more",
        )
        .unwrap();
        assert!((0.0..=100.0).contains(&score), "score was {score}");
    }
}
