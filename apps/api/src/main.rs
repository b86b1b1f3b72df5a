mod config;
mod documents;
mod embedding;
mod errors;
mod routes;
mod scoring;
mod state;
#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::documents::extract::PdfTextExtractor;
use crate::documents::fetch::HttpDocumentFetcher;
use crate::embedding::FastEmbedder;
use crate::routes::build_router;
use crate::scoring::skills::SkillDictionary;
use crate::scoring::ScoringPipeline;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Scoring API v{}", env!("CARGO_PKG_VERSION"));

    // Skill dictionary: built-in table unless a JSON file is configured
    let skills = match &config.skill_dictionary_path {
        Some(path) => SkillDictionary::from_json_file(path)
            .with_context(|| format!("Invalid skill dictionary at {}", path.display()))?,
        None => SkillDictionary::builtin().context("Built-in skill dictionary is invalid")?,
    };
    if skills.is_empty() {
        warn!("Skill dictionary is empty; every skill score will be 0");
    } else {
        info!("Skill dictionary loaded ({} canonical skills)", skills.len());
    }

    // Embedding model: loaded exactly once, shared read-only by all requests
    let settings = config.embedding.clone();
    let embedder = tokio::task::spawn_blocking(move || FastEmbedder::load(&settings))
        .await
        .context("Embedding model loader panicked")??;
    info!("Embedding model ready: {}", embedder.model_name());

    info!(
        "Scoring policy: lexical={} semantic={} skill={} threshold={} points/skill={}",
        config.policy.lexical_weight,
        config.policy.semantic_weight,
        config.policy.skill_weight,
        config.policy.accept_threshold,
        config.policy.points_per_skill
    );

    let fetcher = HttpDocumentFetcher::new(
        Duration::from_secs(config.fetch_timeout_secs),
        config.max_document_bytes,
    )?;

    // Build app state
    let state = AppState {
        pipeline: ScoringPipeline::new(Arc::new(skills), Arc::new(embedder), config.policy),
        fetcher: Arc::new(fetcher),
        extractor: Arc::new(PdfTextExtractor),
    };

    // Build router
    let app = build_router(state).layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
