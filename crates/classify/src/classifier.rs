use thiserror::Error;

use receiptscan_core::Category;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("Classifier request failed: {0}")]
    Http(String),
    #[error("Classifier returned an error: {0}")]
    Api(String),
    #[error("Failed to decode classifier response: {0}")]
    Decode(String),
    #[error("Classifier returned no ranked labels")]
    EmptyRanking,
}

/// A label with the model's score for it, in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredLabel {
    pub label: String,
    pub score: f64,
}

/// Abstraction over a zero-shot text-classification model.
/// Implementations rank the candidate labels for the given text, best first.
pub trait TextClassifier {
    fn classify(&self, text: &str, labels: &[&str]) -> Result<Vec<ScoredLabel>, ClassifyError>;
}

/// Classify receipt text into an expense category.
///
/// Failure here is never fatal: any classifier error, an empty ranking, or a
/// top label outside the known set degrades to `(Other, 0.5)` so the overall
/// pipeline always completes.
pub fn categorize(classifier: &dyn TextClassifier, text: &str) -> (Category, f64) {
    let fallback = (Category::Other, 0.5);

    let ranked = match classifier.classify(text, &Category::CANDIDATE_LABELS) {
        Ok(ranked) => ranked,
        Err(e) => {
            tracing::warn!(error = %e, "classification failed, falling back to Other");
            return fallback;
        }
    };

    let Some(top) = ranked.first() else {
        tracing::warn!("classifier returned an empty ranking, falling back to Other");
        return fallback;
    };

    match top.label.parse::<Category>() {
        Ok(category) => {
            tracing::info!(%category, score = top.score, "expense categorized");
            (category, top.score)
        }
        Err(e) => {
            tracing::warn!(error = %e, "unrecognized top label, falling back to Other");
            fallback
        }
    }
}

// ── Mock classifier (used for tests) ──────────────────────────────────────────

/// Returns a canned ranking, or a canned failure.
pub struct MockClassifier {
    pub outcome: Result<Vec<ScoredLabel>, String>,
}

impl MockClassifier {
    pub fn ranking(ranked: Vec<(&str, f64)>) -> Self {
        Self {
            outcome: Ok(ranked
                .into_iter()
                .map(|(label, score)| ScoredLabel { label: label.to_string(), score })
                .collect()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self { outcome: Err(message.into()) }
    }
}

impl TextClassifier for MockClassifier {
    fn classify(&self, _text: &str, _labels: &[&str]) -> Result<Vec<ScoredLabel>, ClassifyError> {
        match &self.outcome {
            Ok(ranked) => Ok(ranked.clone()),
            Err(msg) => Err(ClassifyError::Api(msg.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_ranked_label_is_chosen() {
        let classifier = MockClassifier::ranking(vec![
            ("Meals & Dining", 0.87),
            ("Client Entertainment", 0.09),
        ]);
        let (category, score) = categorize(&classifier, "JOE'S COFFEE\nTOTAL $5.50");
        assert_eq!(category, Category::MealsAndDining);
        assert_eq!(score, 0.87);
    }

    #[test]
    fn classifier_failure_falls_back_to_other() {
        let classifier = MockClassifier::failing("model unavailable");
        assert_eq!(
            categorize(&classifier, "anything"),
            (Category::Other, 0.5)
        );
    }

    #[test]
    fn empty_ranking_falls_back_to_other() {
        let classifier = MockClassifier::ranking(vec![]);
        assert_eq!(
            categorize(&classifier, "anything"),
            (Category::Other, 0.5)
        );
    }

    #[test]
    fn unknown_top_label_falls_back_to_other() {
        let classifier = MockClassifier::ranking(vec![("Groceries", 0.99)]);
        assert_eq!(
            categorize(&classifier, "anything"),
            (Category::Other, 0.5)
        );
    }
}
