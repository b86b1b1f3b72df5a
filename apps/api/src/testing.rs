//! Deterministic stand-ins for the model and document collaborators.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::documents::{DocumentFetcher, TextExtractor};
use crate::scoring::fusion::ScoringPolicy;
use crate::scoring::semantic::Embedder;
use crate::scoring::skills::SkillDictionary;
use crate::scoring::{ScoringError, ScoringPipeline};
use crate::state::AppState;

/// Bag-of-words embedder: each word bumps a hashed bucket; the last component
/// is a constant bias so no text embeds to the zero vector.
pub struct HashingEmbedder {
    dims: usize,
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self { dims: 64 }
    }
}

fn fnv1a(word: &str) -> u64 {
    word.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

#[async_trait]
impl Embedder for HashingEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ScoringError> {
        let mut vector = vec![0.0_f32; self.dims];
        let buckets = (self.dims - 1) as u64;
        for word in text.split_whitespace() {
            vector[(fnv1a(&word.to_lowercase()) % buckets) as usize] += 1.0;
        }
        vector[self.dims - 1] = 1.0;
        Ok(vector)
    }
}

/// Embeds texts containing `anchor` orthogonally to every other text.
pub struct AnchorEmbedder {
    anchor: &'static str,
}

impl AnchorEmbedder {
    pub fn new(anchor: &'static str) -> Self {
        Self { anchor }
    }
}

#[async_trait]
impl Embedder for AnchorEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ScoringError> {
        if text.contains(self.anchor) {
            Ok(vec![1.0, 0.0])
        } else {
            Ok(vec![0.0, 1.0])
        }
    }
}

pub struct FailingEmbedder;

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, ScoringError> {
        Err(ScoringError::ModelInference("stub model failure".to_string()))
    }
}

/// Serves documents from memory by URL.
#[derive(Default)]
pub struct StubFetcher {
    documents: HashMap<String, Bytes>,
}

impl StubFetcher {
    pub fn with_document(mut self, url: &str, body: &'static [u8]) -> Self {
        self.documents
            .insert(url.to_string(), Bytes::from_static(body));
        self
    }
}

#[async_trait]
impl DocumentFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, ScoringError> {
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| ScoringError::Fetch(format!("document not found at {url}")))
    }
}

/// Treats document bytes as UTF-8 plain text.
pub struct PlainTextExtractor;

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, document: Bytes) -> Result<String, ScoringError> {
        let text = String::from_utf8_lossy(&document).to_lowercase();
        if text.trim().is_empty() {
            return Err(ScoringError::Extraction(
                "document contains no extractable text".to_string(),
            ));
        }
        Ok(text)
    }
}

pub fn test_state(embedder: Arc<dyn Embedder>, fetcher: StubFetcher) -> AppState {
    let pipeline = ScoringPipeline::new(
        Arc::new(SkillDictionary::builtin().unwrap()),
        embedder,
        ScoringPolicy::default(),
    );
    AppState {
        pipeline,
        fetcher: Arc::new(fetcher),
        extractor: Arc::new(PlainTextExtractor),
    }
}
