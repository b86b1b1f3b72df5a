//! Semantic similarity: cosine of pooled document embeddings.
//!
//! The embedding backend is a trait so the pipeline can run against the local
//! ONNX model in production and a deterministic stub in tests.

use async_trait::async_trait;

use crate::scoring::{round2, ScoringError};

/// A text embedding backend. Produces one fixed-size vector per document.
///
/// Carried in `AppState` as `Arc<dyn Embedder>`; implementations must be safe
/// to call from concurrent requests.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ScoringError>;
}

/// Cosine similarity of two dense vectors.
///
/// Errors when the dimensions differ or either vector has zero norm, since
/// neither can come out of a working model.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, ScoringError> {
    if a.len() != b.len() {
        return Err(ScoringError::ModelInference(format!(
            "embedding dimensions differ: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(ScoringError::ModelInference(
            "embedding model returned a zero vector".to_string(),
        ));
    }

    Ok((dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0))
}

/// Embeds both documents concurrently and returns their cosine similarity as
/// a percentage rounded to two decimals. Negative values are kept.
pub async fn semantic_similarity(
    embedder: &dyn Embedder,
    doc_a: &str,
    doc_b: &str,
) -> Result<f64, ScoringError> {
    let (emb_a, emb_b) = tokio::try_join!(embedder.embed(doc_a), embedder.embed(doc_b))?;
    let cosine = cosine_similarity(&emb_a, &emb_b)?;
    Ok(round2(cosine * 100.0))
}
