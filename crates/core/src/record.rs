use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::category::Category;

/// The structured result of one receipt scan.
///
/// Built once by the orchestrator and serialized into the success envelope;
/// never mutated afterwards. `amount`, `date` and `merchant` are
/// independently optional — an extractor miss is absence, not an error.
/// `category` and `confidence_score` are always present because the
/// categorizer degrades to `(Other, 0.5)` instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReceiptRecord {
    /// Normalized raw OCR output (blank lines collapsed, trimmed).
    pub text: String,
    pub amount: Option<f64>,
    /// Serializes as ISO-8601 `YYYY-MM-DD`.
    pub date: Option<NaiveDate>,
    pub merchant: Option<String>,
    pub category: Category,
    pub confidence_score: f64,
}
