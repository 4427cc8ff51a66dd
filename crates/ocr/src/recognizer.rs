use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Failed to start OCR engine: {0}")]
    Spawn(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
}

/// Abstraction over an OCR backend.
/// Implementations accept PNG image bytes and return the recognized text,
/// trimmed of leading/trailing whitespace.
pub trait OcrBackend {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError>;
}

// ── Tesseract subprocess backend ──────────────────────────────────────────────

/// Runs the external `tesseract` binary, feeding the image through stdin and
/// reading the recognized text from stdout. The executable path and language
/// come from configuration — nothing here is hardcoded.
pub struct TesseractRecognizer {
    executable: PathBuf,
    lang: String,
}

impl TesseractRecognizer {
    pub fn new(executable: PathBuf, lang: impl Into<String>) -> Self {
        Self { executable, lang: lang.into() }
    }
}

impl OcrBackend for TesseractRecognizer {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError> {
        let mut child = Command::new(&self.executable)
            .arg("stdin")
            .arg("stdout")
            .arg("-l")
            .arg(&self.lang)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| OcrError::Spawn(e.to_string()))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(image_bytes)
                .map_err(|e| OcrError::Engine(format!("failed to write image to stdin: {e}")))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| OcrError::Engine(e.to_string()))?;

        if !output.status.success() {
            return Err(OcrError::Engine(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

// ── Mock backend (used for tests) ─────────────────────────────────────────────

/// Returns a pre-set string — lets the extraction pipeline be tested against
/// canned text without a tesseract install.
pub struct MockRecognizer {
    pub text: String,
}

impl MockRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl OcrBackend for MockRecognizer {
    fn recognize(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
        Ok(self.text.clone())
    }
}
