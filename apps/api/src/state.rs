use std::sync::Arc;

use crate::documents::{DocumentFetcher, TextExtractor};
use crate::scoring::ScoringPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Skill dictionary, embedding model and fusion policy.
    pub pipeline: ScoringPipeline,
    /// Resume downloader. Default: HttpDocumentFetcher.
    pub fetcher: Arc<dyn DocumentFetcher>,
    /// Resume text extraction. Default: PdfTextExtractor.
    pub extractor: Arc<dyn TextExtractor>,
}
