use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::scoring::ScoringError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant renders as `{"error": "<message>", "code": "<CODE>"}`; the
/// message never carries more than the stage's own description.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Scoring(err) => {
                let (status, code) = match err {
                    ScoringError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
                    ScoringError::Fetch(_) => (StatusCode::BAD_GATEWAY, "FETCH_ERROR"),
                    ScoringError::Extraction(_) => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "EXTRACTION_ERROR")
                    }
                    ScoringError::Vectorization(_) => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "VECTORIZATION_ERROR")
                    }
                    ScoringError::ModelInference(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "MODEL_INFERENCE_ERROR")
                    }
                };
                (status, code, err.to_string())
            }
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal server error occurred".to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        match &self {
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            AppError::Scoring(e) if status.is_server_error() => tracing::error!("{e}"),
            AppError::Scoring(e) => tracing::warn!("Scoring request failed: {e}"),
        }

        let body = Json(json!({
            "error": message,
            "code": code,
        }));

        (status, body).into_response()
    }
}
