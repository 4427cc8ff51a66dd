use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::classifier::{ClassifyError, ScoredLabel, TextClassifier};

/// Hosted zero-shot NLI model on the Hugging Face inference API.
pub const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-mnli";

#[derive(Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
}

#[derive(Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: &'a [&'a str],
}

#[derive(Deserialize)]
struct ZeroShotResponse {
    labels: Vec<String>,
    scores: Vec<f64>,
}

/// Blocking client for a hosted zero-shot classification endpoint.
///
/// The model is a black box: text and candidate labels in, ranked
/// (label, score) pairs out. Errors surface as `ClassifyError` and are
/// absorbed by `categorize`, never by the caller's pipeline.
pub struct ZeroShotApi {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_token: Option<String>,
}

impl ZeroShotApi {
    pub fn new(
        endpoint: impl Into<String>,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ClassifyError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClassifyError::Http(e.to_string()))?;
        Ok(Self { client, endpoint: endpoint.into(), api_token })
    }
}

impl TextClassifier for ZeroShotApi {
    fn classify(&self, text: &str, labels: &[&str]) -> Result<Vec<ScoredLabel>, ClassifyError> {
        let body = ZeroShotRequest { inputs: text, parameters: ZeroShotParameters { candidate_labels: labels } };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().map_err(|e| ClassifyError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(ClassifyError::Api(format!("{status}: {}", detail.trim())));
        }

        let parsed: ZeroShotResponse = response
            .json()
            .map_err(|e| ClassifyError::Decode(e.to_string()))?;

        if parsed.labels.is_empty() || parsed.labels.len() != parsed.scores.len() {
            return Err(ClassifyError::EmptyRanking);
        }

        Ok(parsed
            .labels
            .into_iter()
            .zip(parsed.scores)
            .map(|(label, score)| ScoredLabel { label, score })
            .collect())
    }
}
