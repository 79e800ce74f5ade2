//! TEI (Text Embeddings Inference) client for sequence classification.
//!
//! Talks to a TEI server hosting a star-rating model such as
//! `nlptown/bert-base-multilingual-uncased-sentiment`. `/info` is the load
//! probe; `/predict` returns per-label scores.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ClassificationError;
use crate::model::{ModelInfo, Prediction, RatingModel};

/// TEI HTTP client implementing [`RatingModel`].
pub struct TeiRatingModel {
    client: reqwest::Client,
    base_url: String,
    expected_model: Option<String>,
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    inputs: &'a str,
    truncate: bool,
}

/// `/predict` answers with a flat list for one input; some deployments wrap
/// it in an outer list.
#[derive(Deserialize)]
#[serde(untagged)]
enum PredictResponse {
    Flat(Vec<Prediction>),
    Nested(Vec<Vec<Prediction>>),
}

impl PredictResponse {
    fn into_top(self) -> Option<Prediction> {
        let scores = match self {
            PredictResponse::Flat(scores) => scores,
            PredictResponse::Nested(batches) => batches.into_iter().next()?,
        };
        scores.into_iter().max_by(|a, b| a.score.total_cmp(&b.score))
    }
}

impl TeiRatingModel {
    /// Create a new `TeiRatingModel`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassificationError::Unavailable`] if the HTTP client cannot
    /// be constructed.
    pub fn new(tei_url: &str, timeout_secs: u64) -> Result<Self, ClassificationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ClassificationError::Unavailable(format!("TEI client build: {e}")))?;
        Ok(Self {
            client,
            base_url: tei_url.trim_end_matches('/').to_owned(),
            expected_model: None,
        })
    }

    /// Warn at load time if the server reports a different model id.
    #[must_use]
    pub fn with_expected_model(mut self, model_id: impl Into<String>) -> Self {
        self.expected_model = Some(model_id.into());
        self
    }
}

#[async_trait]
impl RatingModel for TeiRatingModel {
    async fn load(&self) -> Result<ModelInfo, ClassificationError> {
        let url = format!("{}/info", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClassificationError::Unavailable(format!("TEI info request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ClassificationError::Unavailable(format!(
                "TEI info returned status {}",
                response.status()
            )));
        }

        let info: ModelInfo = response
            .json()
            .await
            .map_err(|e| ClassificationError::Malformed(format!("TEI info parse error: {e}")))?;

        if let Some(expected) = &self.expected_model {
            if expected != &info.model_id {
                tracing::warn!(
                    expected = %expected,
                    served = %info.model_id,
                    "TEI is serving a different model than configured"
                );
            }
        }

        Ok(info)
    }

    async fn predict(&self, text: &str) -> Result<Prediction, ClassificationError> {
        let url = format!("{}/predict", self.base_url);
        let request = PredictRequest {
            inputs: text,
            truncate: true,
        };
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClassificationError::Unavailable(format!("TEI request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ClassificationError::Unavailable(format!(
                "TEI returned status {}",
                response.status()
            )));
        }

        let parsed: PredictResponse = response
            .json()
            .await
            .map_err(|e| ClassificationError::Malformed(format!("TEI response parse error: {e}")))?;

        parsed
            .into_top()
            .ok_or_else(|| ClassificationError::Malformed("TEI returned no labels".to_owned()))
    }
}
