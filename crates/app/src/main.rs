use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use receiptscan_classify::{categorize, zero_shot, ZeroShotApi};
use receiptscan_core::{Category, ReceiptRecord};
use receiptscan_ocr::{
    verify_install, PipelineError, ReceiptPipeline, TesseractRecognizer, VerifyError,
};

mod output;

/// Extract structured expense data from a receipt image.
///
/// Emits exactly one JSON document on stdout:
/// `{"success": true, "data": {...}}` on success, `{"error": "..."}` on
/// failure. Diagnostics go to stderr (RUST_LOG controls verbosity).
#[derive(Parser, Debug)]
#[command(name = "receiptscan", version, about)]
struct Cli {
    /// Path to the receipt image (PNG, JPEG, ...).
    image: PathBuf,

    /// Path to the tesseract executable.
    #[arg(long, env = "RECEIPTSCAN_OCR_CMD", default_value = "tesseract")]
    ocr_cmd: PathBuf,

    /// OCR language passed to tesseract.
    #[arg(long, env = "RECEIPTSCAN_OCR_LANG", default_value = "eng")]
    ocr_lang: String,

    /// Zero-shot classification endpoint.
    #[arg(long, env = "RECEIPTSCAN_CLASSIFIER_URL", default_value = zero_shot::DEFAULT_ENDPOINT)]
    classifier_url: String,

    /// Bearer token for the classification endpoint.
    #[arg(long, env = "RECEIPTSCAN_API_TOKEN")]
    api_token: Option<String>,

    /// Classifier request timeout in seconds.
    #[arg(long, env = "RECEIPTSCAN_CLASSIFIER_TIMEOUT_SECS", default_value_t = 60)]
    classifier_timeout_secs: u64,
}

#[derive(Debug, Error)]
enum AppError {
    #[error("OCR engine is not properly installed: {0}")]
    Dependency(#[from] VerifyError),
    #[error("Failed to process receipt: {0}")]
    Pipeline(#[from] PipelineError),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            // Bad invocation: the error envelope still goes to stdout so
            // callers always get JSON there.
            output::print_error(&e.to_string());
            return ExitCode::FAILURE;
        }
        Err(e) => {
            // --help / --version.
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
    };

    match run(&cli) {
        Ok(record) => {
            output::print_success(&record);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "receipt processing failed");
            output::print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

/// Verify → OCR + extract → categorize → assemble.
fn run(cli: &Cli) -> Result<ReceiptRecord, AppError> {
    let message = verify_install(&cli.ocr_cmd)?;
    tracing::info!("{message}");

    let recognizer = TesseractRecognizer::new(cli.ocr_cmd.clone(), cli.ocr_lang.clone());
    let scan = ReceiptPipeline::new(recognizer).process_image(&cli.image)?;

    // Classification degrades to (Other, 0.5) instead of failing the run,
    // including when the HTTP client itself cannot be constructed.
    let (category, confidence_score) = match ZeroShotApi::new(
        &cli.classifier_url,
        cli.api_token.clone(),
        Duration::from_secs(cli.classifier_timeout_secs),
    ) {
        Ok(api) => categorize(&api, &scan.text),
        Err(e) => {
            tracing::warn!(error = %e, "classifier unavailable, falling back to Other");
            (Category::Other, 0.5)
        }
    };

    Ok(ReceiptRecord {
        text: scan.text,
        amount: scan.amount,
        date: scan.date,
        merchant: scan.merchant,
        category,
        confidence_score,
    })
}
