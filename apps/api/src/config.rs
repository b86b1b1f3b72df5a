use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::embedding::{EmbeddingSettings, ModelChoice};
use crate::scoring::fusion::ScoringPolicy;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub policy: ScoringPolicy,
    pub embedding: EmbeddingSettings,
    /// JSON skill table replacing the built-in one.
    pub skill_dictionary_path: Option<PathBuf>,
    pub fetch_timeout_secs: u64,
    pub max_document_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = ScoringPolicy::default();
        let policy = ScoringPolicy {
            lexical_weight: parse_or(&lookup, "SCORE_WEIGHT_LEXICAL", defaults.lexical_weight)?,
            semantic_weight: parse_or(&lookup, "SCORE_WEIGHT_SEMANTIC", defaults.semantic_weight)?,
            skill_weight: parse_or(&lookup, "SCORE_WEIGHT_SKILL", defaults.skill_weight)?,
            accept_threshold: parse_or(&lookup, "ACCEPT_THRESHOLD", defaults.accept_threshold)?,
            points_per_skill: parse_or(&lookup, "SKILL_POINTS", defaults.points_per_skill)?,
        };
        validate_policy(&policy)?;

        let max_tokens: usize = parse_or(&lookup, "EMBEDDING_MAX_TOKENS", 512)?;
        if max_tokens == 0 {
            bail!("EMBEDDING_MAX_TOKENS must be greater than zero");
        }

        Ok(Config {
            port: parse_or(&lookup, "PORT", 8000)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            policy,
            embedding: EmbeddingSettings {
                model: parse_or(&lookup, "EMBEDDING_MODEL", ModelChoice::AllMiniLmL6V2)?,
                max_tokens,
                cache_dir: lookup("EMBEDDING_CACHE_DIR").map(PathBuf::from),
            },
            skill_dictionary_path: lookup("SKILL_DICTIONARY_PATH").map(PathBuf::from),
            fetch_timeout_secs: parse_or(&lookup, "FETCH_TIMEOUT_SECS", 30)?,
            max_document_bytes: parse_or(&lookup, "MAX_DOCUMENT_BYTES", 10 * 1024 * 1024)?,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

fn validate_policy(policy: &ScoringPolicy) -> Result<()> {
    let weights = [
        ("SCORE_WEIGHT_LEXICAL", policy.lexical_weight),
        ("SCORE_WEIGHT_SEMANTIC", policy.semantic_weight),
        ("SCORE_WEIGHT_SKILL", policy.skill_weight),
        ("SKILL_POINTS", policy.points_per_skill),
    ];
    for (key, value) in weights {
        if !value.is_finite() || value < 0.0 {
            bail!("{key} must be a finite, non-negative number (got {value})");
        }
    }
    if !policy.accept_threshold.is_finite() {
        bail!("ACCEPT_THRESHOLD must be a finite number");
    }
    Ok(())
}
