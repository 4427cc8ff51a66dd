pub mod extract;
pub mod pipeline;
pub mod preprocess;
pub mod recognizer;
pub mod verify;

pub use extract::{extract_amount, extract_date, extract_merchant};
pub use pipeline::{PipelineError, ReceiptPipeline, ScanResult};
pub use preprocess::{load_for_ocr, PreprocessError};
pub use recognizer::{MockRecognizer, OcrBackend, OcrError, TesseractRecognizer};
pub use verify::{verify_install, VerifyError};
