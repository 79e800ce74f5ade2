//! The text-to-rating model seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ClassificationError;

/// Identity of a loaded model, reported once by [`RatingModel::load`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_id: String,
    #[serde(default)]
    pub max_input_length: Option<usize>,
}

/// The model's top label for one text, e.g. `"4 stars"` at `0.71`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub score: f32,
}

/// A pretrained star-rating text classifier.
///
/// `load` is called at most once per [`crate::SentimentClassifier`] before the
/// first `predict`; implementations may use it to verify the model is ready.
/// `predict` must be safe to call concurrently.
#[async_trait]
pub trait RatingModel: Send + Sync {
    async fn load(&self) -> Result<ModelInfo, ClassificationError>;

    async fn predict(&self, text: &str) -> Result<Prediction, ClassificationError>;
}
