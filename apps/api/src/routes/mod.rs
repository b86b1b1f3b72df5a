pub mod health;

use axum::{
    body::Body,
    http::Request,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::{info_span, Span};
use uuid::Uuid;

use crate::scoring::handlers;
use crate::state::AppState;

/// One span per request; everything logged while handling it, including
/// error responses, carries the request id. Only the path is recorded.
fn request_span(request: &Request<Body>) -> Span {
    info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %Uuid::new_v4(),
    )
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Scoring API
        .route("/score-resume", post(handlers::handle_score_resume))
        .route("/score-resume/", post(handlers::handle_score_resume))
        .route("/score-text", post(handlers::handle_score_text))
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
}
