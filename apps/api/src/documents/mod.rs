//! Document collaborators: download a resume and pull plain text out of it.
//!
//! Both sit behind traits so handlers can be tested without network access or
//! real PDF files. Neither retries; a failure is reported straight back to the
//! caller as an input error.

pub mod extract;
pub mod fetch;

use async_trait::async_trait;
use bytes::Bytes;

use crate::scoring::ScoringError;

/// Downloads the raw bytes of a document.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Bytes, ScoringError>;
}

/// Extracts lowercase plain text from document bytes.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, document: Bytes) -> Result<String, ScoringError>;
}
