//! Axum route handlers for the Scoring API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::scoring::fusion::{Decision, ScoreBreakdown};
use crate::scoring::{ScoringError, ScoringResult};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScoreResumeRequest {
    pub resume_url: String,
    pub job_description: String,
    #[serde(default)]
    pub job_requirements: String,
}

#[derive(Debug, Deserialize)]
pub struct ScoreTextRequest {
    pub resume_text: String,
    pub job_description: String,
    #[serde(default)]
    pub job_requirements: String,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub resume_score: f64,
    pub matched_skills: Vec<String>,
    pub status: Decision,
    pub breakdown: ScoreBreakdown,
}

impl From<ScoringResult> for ScoreResponse {
    fn from(result: ScoringResult) -> Self {
        Self {
            resume_score: result.final_score,
            matched_skills: result.matched_skills,
            status: result.status,
            breakdown: result.breakdown,
        }
    }
}

fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ScoringError::InvalidInput(rejection.body_text()).into())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /score-resume
///
/// Downloads the resume PDF, extracts its text and scores it against the job
/// posting. A rejected candidate is still a 200; only stage failures are errors.
pub async fn handle_score_resume(
    State(state): State<AppState>,
    payload: Result<Json<ScoreResumeRequest>, JsonRejection>,
) -> Result<Json<ScoreResponse>, AppError> {
    let request = parse_body(payload)?;

    let document = state.fetcher.fetch(&request.resume_url).await?;
    let resume_text = state.extractor.extract(document).await?;

    let result = state
        .pipeline
        .score(
            &resume_text,
            &request.job_description,
            &request.job_requirements,
        )
        .await?;

    info!(
        score = result.final_score,
        status = ?result.status,
        skills = result.matched_skills.len(),
        "Scored downloaded resume"
    );

    Ok(Json(result.into()))
}

/// POST /score-text
///
/// Scores already-extracted resume text. The text is lowercased the same way
/// extracted PDF text is.
pub async fn handle_score_text(
    State(state): State<AppState>,
    payload: Result<Json<ScoreTextRequest>, JsonRejection>,
) -> Result<Json<ScoreResponse>, AppError> {
    let request = parse_body(payload)?;

    let result = state
        .pipeline
        .score(
            &request.resume_text.to_lowercase(),
            &request.job_description,
            &request.job_requirements,
        )
        .await?;

    info!(
        score = result.final_score,
        status = ?result.status,
        skills = result.matched_skills.len(),
        "Scored submitted resume text"
    );

    Ok(Json(result.into()))
}
