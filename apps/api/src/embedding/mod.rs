//! Local embedding backend for semantic similarity.
//!
//! Runs a sentence-transformer model through fastembed (ONNX, no external
//! API). The model is loaded once at startup and shared by every request.
//! fastembed needs `&mut` for inference, so calls are serialized on a mutex
//! and executed on the blocking pool; the rest of the pipeline never waits
//! on that lock.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::{debug, error, info};

use crate::scoring::semantic::Embedder;
use crate::scoring::ScoringError;

/// Mean-pooled sentence-transformer models selectable through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelChoice {
    AllMiniLmL6V2,
    AllMiniLmL12V2,
    ParaphraseMultilingualMiniLmL12V2,
    NomicEmbedTextV15,
}

impl ModelChoice {
    pub fn name(&self) -> &'static str {
        match self {
            ModelChoice::AllMiniLmL6V2 => "all-minilm-l6-v2",
            ModelChoice::AllMiniLmL12V2 => "all-minilm-l12-v2",
            ModelChoice::ParaphraseMultilingualMiniLmL12V2 => {
                "paraphrase-multilingual-minilm-l12-v2"
            }
            ModelChoice::NomicEmbedTextV15 => "nomic-embed-text-v1.5",
        }
    }

    fn fastembed_model(&self) -> EmbeddingModel {
        match self {
            ModelChoice::AllMiniLmL6V2 => EmbeddingModel::AllMiniLML6V2,
            ModelChoice::AllMiniLmL12V2 => EmbeddingModel::AllMiniLML12V2,
            ModelChoice::ParaphraseMultilingualMiniLmL12V2 => {
                EmbeddingModel::ParaphraseMLMiniLML12V2
            }
            ModelChoice::NomicEmbedTextV15 => EmbeddingModel::NomicEmbedTextV15,
        }
    }
}

impl FromStr for ModelChoice {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all-minilm-l6-v2" => Ok(ModelChoice::AllMiniLmL6V2),
            "all-minilm-l12-v2" => Ok(ModelChoice::AllMiniLmL12V2),
            "paraphrase-multilingual-minilm-l12-v2" => {
                Ok(ModelChoice::ParaphraseMultilingualMiniLmL12V2)
            }
            "nomic-embed-text-v1.5" => Ok(ModelChoice::NomicEmbedTextV15),
            other => Err(anyhow!("unsupported embedding model '{other}'")),
        }
    }
}

/// Settings for loading the embedding model.
#[derive(Debug, Clone)]
pub struct EmbeddingSettings {
    pub model: ModelChoice,
    /// Token window; longer inputs are truncated, not rejected.
    pub max_tokens: usize,
    pub cache_dir: Option<PathBuf>,
}

/// The process-wide embedding model.
#[derive(Clone)]
pub struct FastEmbedder {
    model: Arc<Mutex<TextEmbedding>>,
    model_name: &'static str,
}

impl FastEmbedder {
    /// Loads (downloading on first use) the configured model. Blocking; call
    /// once during startup.
    pub fn load(settings: &EmbeddingSettings) -> Result<Self> {
        let mut options = InitOptions::new(settings.model.fastembed_model())
            .with_max_length(settings.max_tokens)
            .with_show_download_progress(false);
        if let Some(dir) = &settings.cache_dir {
            options = options.with_cache_dir(dir.clone());
        }

        let model = TextEmbedding::try_new(options).map_err(|e| {
            anyhow!(
                "Failed to load embedding model {}: {e:?}",
                settings.model.name()
            )
        })?;

        info!(
            "Embedding model loaded: {} (max {} tokens)",
            settings.model.name(),
            settings.max_tokens
        );

        Ok(Self {
            model: Arc::new(Mutex::new(model)),
            model_name: settings.model.name(),
        })
    }

    pub fn model_name(&self) -> &'static str {
        self.model_name
    }
}

#[async_trait]
impl Embedder for FastEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ScoringError> {
        let model = Arc::clone(&self.model);
        let input = text.to_string();

        let embedding = tokio::task::spawn_blocking(move || {
            let mut model = model.lock().map_err(|_| {
                ScoringError::ModelInference("embedding model lock poisoned".to_string())
            })?;
            model.embed(vec![input], None).map_err(inference_error)
        })
        .await
        .map_err(|e| ScoringError::ModelInference(format!("inference task failed: {e}")))??
        .into_iter()
        .next()
        .ok_or_else(|| {
            ScoringError::ModelInference("embedding model returned no vectors".to_string())
        })?;

        debug!(
            model = self.model_name,
            dim = embedding.len(),
            text_len = text.len(),
            "embedding computed"
        );
        Ok(embedding)
    }
}

/// Logs the full error report and keeps only the one-line cause chain for
/// the caller.
fn inference_error<E: fmt::Display + fmt::Debug>(err: E) -> ScoringError {
    error!("Embedding inference failed: {err:?}");
    ScoringError::ModelInference(format!("{err:#}"))
}
