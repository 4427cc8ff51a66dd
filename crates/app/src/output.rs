use serde::Serialize;

use receiptscan_core::ReceiptRecord;

#[derive(Serialize)]
struct SuccessEnvelope<'a> {
    success: bool,
    data: &'a ReceiptRecord,
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    error: &'a str,
}

/// Print the success envelope on stdout. Stdout carries exactly one JSON
/// document per invocation; all diagnostics go to stderr via tracing.
pub fn print_success(record: &ReceiptRecord) {
    let envelope = SuccessEnvelope { success: true, data: record };
    println!("{}", serde_json::to_string(&envelope).expect("record serializes"));
}

/// Print the failure envelope on stdout.
pub fn print_error(message: &str) {
    let envelope = ErrorEnvelope { error: message };
    println!("{}", serde_json::to_string(&envelope).expect("error serializes"));
}
