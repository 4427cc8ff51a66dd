pub mod classifier;
pub mod zero_shot;

pub use classifier::{categorize, ClassifyError, MockClassifier, ScoredLabel, TextClassifier};
pub use zero_shot::ZeroShotApi;
