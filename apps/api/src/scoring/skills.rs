//! Skill dictionary and single-token skill matcher.
//!
//! Matching tests each synonym against the set of whitespace-separated words of
//! a normalized document. Synonyms containing a space or punctuation
//! ("spring boot", "node.js", "c++") can therefore never match; scoring results
//! depend on that, so it is kept as-is.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::scoring::normalize::NormalizedDocument;

/// Built-in canonical skill → synonyms table.
const BUILTIN_SKILLS: &[(&str, &[&str])] = &[
    ("python", &["python", "django", "flask", "fastapi"]),
    ("java", &["java", "spring boot", "hibernate"]),
    ("javascript", &["javascript", "node.js", "react", "angular", "vue"]),
    ("typescript", &["typescript", "ts"]),
    ("c++", &["c++", "cpp", "stl"]),
    ("sql", &["sql", "mysql", "postgresql", "oracle"]),
    ("cloud", &["aws", "azure", "gcp"]),
    ("machine learning", &["ml", "tensorflow", "pytorch", "scikit-learn"]),
    ("data science", &["data analytics", "pandas", "numpy", "matplotlib"]),
    ("deep learning", &["cnn", "rnn", "lstm"]),
    ("nlp", &["natural language processing", "nltk", "spacy"]),
    ("blockchain", &["blockchain", "solidity", "web3", "ethereum"]),
    ("cybersecurity", &["ethical hacking", "penetration testing"]),
];

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("skill dictionary contains an entry with an empty canonical name")]
    EmptyCanonical,

    #[error("skill '{0}' has no synonyms")]
    EmptySynonyms(String),

    #[error("skill '{0}' is defined more than once")]
    DuplicateCanonical(String),

    #[error("failed to read skill dictionary {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse skill dictionary: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One canonical skill with its surface forms.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SkillEntry {
    #[serde(rename = "skill")]
    pub canonical: String,
    pub synonyms: Vec<String>,
}

/// Immutable skill table, validated once at startup and shared across requests.
#[derive(Debug, Clone)]
pub struct SkillDictionary {
    entries: Vec<SkillEntry>,
}

impl SkillDictionary {
    pub fn builtin() -> Result<Self, DictionaryError> {
        Self::from_entries(BUILTIN_SKILLS.iter().map(|(canonical, synonyms)| SkillEntry {
            canonical: canonical.to_string(),
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
        }))
    }

    /// Validates and builds a dictionary.
    ///
    /// Canonical names must be non-empty and unique (case-insensitive), every
    /// entry needs at least one non-blank synonym. Synonyms are trimmed,
    /// lowercased and deduplicated keeping first occurrence order.
    pub fn from_entries(
        entries: impl IntoIterator<Item = SkillEntry>,
    ) -> Result<Self, DictionaryError> {
        let mut seen = HashSet::new();
        let mut validated = Vec::new();

        for entry in entries {
            let canonical = entry.canonical.trim().to_string();
            if canonical.is_empty() {
                return Err(DictionaryError::EmptyCanonical);
            }
            if !seen.insert(canonical.to_lowercase()) {
                return Err(DictionaryError::DuplicateCanonical(canonical));
            }

            let mut synonyms: Vec<String> = Vec::with_capacity(entry.synonyms.len());
            for synonym in entry.synonyms {
                let synonym = synonym.trim().to_lowercase();
                if !synonym.is_empty() && !synonyms.contains(&synonym) {
                    synonyms.push(synonym);
                }
            }
            if synonyms.is_empty() {
                return Err(DictionaryError::EmptySynonyms(canonical));
            }

            validated.push(SkillEntry {
                canonical,
                synonyms,
            });
        }

        Ok(Self { entries: validated })
    }

    /// Parses a JSON array of `{"skill": ..., "synonyms": [...]}` objects.
    pub fn from_json_str(json: &str) -> Result<Self, DictionaryError> {
        let entries: Vec<SkillEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, DictionaryError> {
        let json = std::fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[SkillEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical names of every skill with at least one synonym among the
    /// document's words. Sorted, since the set is `BTreeSet`.
    pub fn extract_skills(&self, text: &NormalizedDocument) -> BTreeSet<String> {
        let words: HashSet<&str> = text.words().collect();

        self.entries
            .iter()
            .filter(|entry| entry.synonyms.iter().any(|s| words.contains(s.as_str())))
            .map(|entry| entry.canonical.clone())
            .collect()
    }
}

/// Uncapped skill score: a fixed number of points per matched canonical skill.
pub fn skill_score(matched_skills: usize, points_per_skill: f64) -> f64 {
    matched_skills as f64 * points_per_skill
}
