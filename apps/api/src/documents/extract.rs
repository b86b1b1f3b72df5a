use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::documents::TextExtractor;
use crate::scoring::ScoringError;

const PDF_MAGIC: &[u8] = b"%PDF";
/// Readers accept up to this many bytes of junk before the header.
const PDF_HEADER_WINDOW: usize = 1024;

/// Extracts text from in-memory PDF bytes with `pdf-extract`.
///
/// Parsing runs on the blocking pool. The parser panics on some malformed
/// files; the panic surfaces as a join error and is reported as an
/// extraction failure instead of taking the worker down.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, document: Bytes) -> Result<String, ScoringError> {
        if !has_pdf_header(&document) {
            return Err(ScoringError::Extraction(
                "document is not a PDF file".to_string(),
            ));
        }

        let raw = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&document).map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| ScoringError::Extraction(format!("PDF parser aborted: {e}")))?
        .map_err(|e| ScoringError::Extraction(format!("unreadable PDF: {e}")))?;

        finish_text(&raw)
    }
}

fn has_pdf_header(document: &[u8]) -> bool {
    let window = &document[..document.len().min(PDF_HEADER_WINDOW + PDF_MAGIC.len())];
    window.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC)
}

/// Lowercases extracted text and rejects documents with nothing readable.
fn finish_text(raw: &str) -> Result<String, ScoringError> {
    if raw.trim().is_empty() {
        return Err(ScoringError::Extraction(
            "document contains no extractable text".to_string(),
        ));
    }
    debug!("Extracted {} characters of text", raw.len());
    Ok(raw.to_lowercase())
}
