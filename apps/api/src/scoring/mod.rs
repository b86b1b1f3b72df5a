// Resume scoring pipeline.
// normalize → {skill match, lexical similarity, semantic similarity} → fusion.
// Each request is scored independently; only the skill dictionary and the
// embedding model are shared, both read-only.

pub mod fusion;
pub mod handlers;
pub mod lexical;
pub mod normalize;
pub mod semantic;
pub mod skills;

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::scoring::fusion::{decide, fused_score, Decision, ScoreBreakdown, ScoringPolicy};
use crate::scoring::lexical::lexical_similarity;
use crate::scoring::normalize::normalize;
use crate::scoring::semantic::{semantic_similarity, Embedder};
use crate::scoring::skills::{skill_score, SkillDictionary};

/// Failure of one pipeline stage. Any of these aborts the whole request.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to fetch document: {0}")]
    Fetch(String),

    #[error("Failed to extract document text: {0}")]
    Extraction(String),

    #[error("Failed to vectorize documents: {0}")]
    Vectorization(String),

    #[error("Embedding inference failed: {0}")]
    ModelInference(String),
}

/// Outcome of scoring one resume against one job posting.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringResult {
    pub final_score: f64,
    /// Canonical skill names, sorted.
    pub matched_skills: Vec<String>,
    pub status: Decision,
    pub breakdown: ScoreBreakdown,
}

/// The scoring pipeline with its shared, read-only collaborators injected.
#[derive(Clone)]
pub struct ScoringPipeline {
    skills: Arc<SkillDictionary>,
    embedder: Arc<dyn Embedder>,
    policy: ScoringPolicy,
}

impl ScoringPipeline {
    pub fn new(
        skills: Arc<SkillDictionary>,
        embedder: Arc<dyn Embedder>,
        policy: ScoringPolicy,
    ) -> Self {
        Self {
            skills,
            embedder,
            policy,
        }
    }

    /// Scores resume text against the combined job description and
    /// requirements. All-or-nothing: any stage failure returns an error and no
    /// partial result.
    pub async fn score(
        &self,
        resume_text: &str,
        job_description: &str,
        job_requirements: &str,
    ) -> Result<ScoringResult, ScoringError> {
        let resume = normalize(resume_text);
        if resume.is_empty() {
            return Err(ScoringError::Extraction("resume text is empty".to_string()));
        }

        // Job text is scored as written; the lexical tokenizer and the embedding
        // model lowercase and split it themselves.
        let job = format!("{job_description} {job_requirements}");
        if job.trim().is_empty() {
            return Err(ScoringError::InvalidInput(
                "job description and requirements are empty".to_string(),
            ));
        }

        let matched = self.skills.extract_skills(&resume);
        let skill = skill_score(matched.len(), self.policy.points_per_skill);
        let lexical = lexical_similarity(resume.as_str(), &job)?;
        let semantic =
            semantic_similarity(self.embedder.as_ref(), resume.as_str(), &job).await?;

        let breakdown = ScoreBreakdown {
            lexical,
            semantic,
            skill,
        };
        let final_score = fused_score(&breakdown, &self.policy);
        let status = decide(final_score, &self.policy);

        debug!(
            lexical,
            semantic,
            skill,
            final_score,
            "Scored resume ({} words) against job text ({} words)",
            resume.words().count(),
            job.split_whitespace().count()
        );

        Ok(ScoringResult {
            final_score,
            matched_skills: matched.into_iter().collect(),
            status,
            breakdown,
        })
    }
}

/// Rounds to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
