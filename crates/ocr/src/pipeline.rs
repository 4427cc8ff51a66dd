use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;

use crate::extract;
use crate::preprocess::{self, PreprocessError};
use crate::recognizer::{OcrBackend, OcrError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{0}")]
    Preprocess(#[from] PreprocessError),
    #[error("{0}")]
    Ocr(#[from] OcrError),
    #[error("No text could be extracted from the image")]
    EmptyText,
}

/// Text plus best-guess fields from one scanned receipt. Categorization is a
/// separate concern and happens downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    /// Normalized OCR output: blank lines collapsed, trimmed.
    pub text: String,
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub merchant: Option<String>,
}

/// Orchestrates: preprocess → OCR → normalize → field extraction.
pub struct ReceiptPipeline<R: OcrBackend> {
    recognizer: R,
}

impl<R: OcrBackend> ReceiptPipeline<R> {
    pub fn new(recognizer: R) -> Self {
        Self { recognizer }
    }

    /// Process an image file on disk.
    ///
    /// Empty OCR output is fatal here — it is distinct from a field-level
    /// miss, which shows up as `None` in the result and is not an error.
    pub fn process_image(&self, path: &Path) -> Result<ScanResult, PipelineError> {
        tracing::info!(path = %path.display(), "processing receipt image");

        let image_bytes = preprocess::load_for_ocr(path)?;
        tracing::debug!(bytes = image_bytes.len(), "image normalized for OCR");

        let raw = self.recognizer.recognize(&image_bytes)?;
        if raw.trim().is_empty() {
            return Err(PipelineError::EmptyText);
        }

        let text = normalize_text(&raw);
        tracing::info!(chars = text.len(), "OCR text recognized");
        tracing::debug!(preview = %text.chars().take(100).collect::<String>(), "text preview");

        // The three extractors are independent: each scans the full text and
        // a miss in one never blocks the others.
        let amount = extract::extract_amount(&text);
        let date = extract::extract_date(&text);
        let merchant = extract::extract_merchant(&text);
        tracing::info!(?amount, ?date, ?merchant, "fields extracted");

        Ok(ScanResult { text, amount, date, merchant })
    }
}

/// Collapse blank lines and trim surrounding whitespace.
fn normalize_text(raw: &str) -> String {
    raw.replace("\n\n", "\n").trim().to_string()
}
