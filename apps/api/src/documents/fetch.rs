use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use crate::documents::DocumentFetcher;
use crate::scoring::ScoringError;

/// Fetches documents over HTTP(S) with a size cap. One shared client, no retries.
#[derive(Clone)]
pub struct HttpDocumentFetcher {
    client: Client,
    max_bytes: usize,
}

impl HttpDocumentFetcher {
    pub fn new(timeout: Duration, max_bytes: usize) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for document downloads")?;
        Ok(Self { client, max_bytes })
    }
}

/// Accepts only absolute http/https URLs.
fn parse_document_url(url: &str) -> Result<Url, ScoringError> {
    let parsed = Url::parse(url.trim())
        .map_err(|e| ScoringError::InvalidInput(format!("invalid resume URL '{url}': {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(ScoringError::InvalidInput(format!(
            "unsupported resume URL scheme '{other}'"
        ))),
    }
}

#[async_trait]
impl DocumentFetcher for HttpDocumentFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, ScoringError> {
        let parsed = parse_document_url(url)?;
        let shown = redacted(&parsed);

        let mut response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| {
                ScoringError::Fetch(format!("request to {shown} failed: {}", e.without_url()))
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ScoringError::Fetch(format!("document not found at {shown}")));
        }
        if !status.is_success() {
            return Err(ScoringError::Fetch(format!(
                "document server returned {status} for {shown}"
            )));
        }

        if let Some(len) = response.content_length() {
            if len > self.max_bytes as u64 {
                return Err(too_large(self.max_bytes));
            }
        }

        let mut body = BytesMut::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| {
                ScoringError::Fetch(format!(
                    "failed reading body from {shown}: {}",
                    e.without_url()
                ))
            })?
        {
            if body.len() + chunk.len() > self.max_bytes {
                return Err(too_large(self.max_bytes));
            }
            body.extend_from_slice(&chunk);
        }

        debug!("Downloaded {} bytes from {shown}", body.len());
        Ok(body.freeze())
    }
}

/// URL without credentials, query or fragment. Resume links are often
/// pre-signed, so only this form goes into logs and error messages.
fn redacted(url: &Url) -> String {
    let mut shown = url.clone();
    let _ = shown.set_username("");
    let _ = shown.set_password(None);
    shown.set_query(None);
    shown.set_fragment(None);
    shown.to_string()
}

fn too_large(max_bytes: usize) -> ScoringError {
    ScoringError::Fetch(format!("document exceeds the {max_bytes}-byte limit"))
}
