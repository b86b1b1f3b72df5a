//! Text normalizer applied to every document entering the scoring pipeline.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9\s]").expect("static regex"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));

/// Lowercase text made of ASCII letters, digits and single spaces.
///
/// Only constructible through [`normalize`], so holding one means the text
/// already went through the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedDocument(String);

impl NormalizedDocument {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whitespace-separated words in document order, repeats included.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|w| !w.is_empty())
    }
}

impl fmt::Display for NormalizedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedDocument {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Strips every character that is not an ASCII letter, digit or whitespace,
/// lowercases, collapses whitespace runs and trims. Total and idempotent.
pub fn normalize(raw: &str) -> NormalizedDocument {
    let stripped = NON_ALPHANUMERIC.replace_all(raw, "");
    let collapsed = WHITESPACE_RUN.replace_all(&stripped, " ");
    NormalizedDocument(collapsed.trim().to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_punctuation_and_lowercases() {
        let doc = normalize("Node.js, React & C++ Developer!");
        assert_eq!(doc.as_str(), "nodejs react c developer");
    }

    #[test]
    fn test_collapses_whitespace_and_trims() {
        let doc = normalize("  python\n\n\tdjango    flask  ");
        assert_eq!(doc.as_str(), "python django flask");
    }

    #[test]
    fn test_removes_non_ascii_letters() {
        let doc = normalize("Résumé — naïve café");
        assert_eq!(doc.as_str(), "rsum nave caf");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "",
            "   ",
            "Senior Rust Engineer (5+ yrs) — distributed systems!!",
            "already normalized text",
            "Tabs\tand\nnewlines\r\nmixed",
            "ÆØÅ 123 ### abc",
        ];
        for input in inputs {
            let once = normalize(input);
            let twice = normalize(once.as_str());
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_empty_and_symbol_only_input_is_empty() {
        assert!(normalize("").is_empty());
        assert!(normalize("!!! ??? ...").is_empty());
    }

    #[test]
    fn test_words_iterates_tokens() {
        let doc = normalize("python  django python");
        let words: Vec<&str> = doc.words().collect();
        assert_eq!(words, vec!["python", "django", "python"]);
    }
}
