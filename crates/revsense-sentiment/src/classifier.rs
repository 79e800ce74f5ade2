//! Star-rating classification with a lazily initialized, shared model.

use std::sync::Arc;

use revsense_core::{ClassifiedReview, RatingClass, ReviewMetadata, SentimentLabel};
use tokio::sync::OnceCell;

use crate::error::ClassificationError;
use crate::model::{ModelInfo, RatingModel};

/// Result of classifying one text.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub rating: RatingClass,
    pub label: SentimentLabel,
    pub confidence: f32,
    pub model_label: String,
}

impl Classification {
    #[must_use]
    pub fn into_review(self, text: &str, metadata: ReviewMetadata) -> ClassifiedReview {
        ClassifiedReview {
            text: text.to_owned(),
            label: self.label,
            rating: self.rating,
            confidence: self.confidence,
            model_label: self.model_label,
            metadata,
        }
    }
}

/// Wraps a [`RatingModel`] and maps its star output to a [`SentimentLabel`].
///
/// The model is loaded on first use. Concurrent first callers wait on the
/// same load; a failed load leaves the classifier unloaded so a later call
/// tries again. Share one instance per process behind an `Arc`.
pub struct SentimentClassifier {
    model: Arc<dyn RatingModel>,
    info: OnceCell<ModelInfo>,
}

impl SentimentClassifier {
    #[must_use]
    pub fn new(model: Arc<dyn RatingModel>) -> Self {
        Self {
            model,
            info: OnceCell::new(),
        }
    }

    /// Loads the model if it has not been loaded yet.
    ///
    /// # Errors
    ///
    /// Returns the model's load error; the next call retries.
    pub async fn ensure_loaded(&self) -> Result<&ModelInfo, ClassificationError> {
        self.info
            .get_or_try_init(|| async {
                let info = self.model.load().await?;
                tracing::info!(
                    model = %info.model_id,
                    max_input_length = ?info.max_input_length,
                    "sentiment model loaded"
                );
                Ok::<_, ClassificationError>(info)
            })
            .await
    }

    /// Info for the loaded model, or `None` before the first successful load.
    #[must_use]
    pub fn model_info(&self) -> Option<&ModelInfo> {
        self.info.get()
    }

    /// Classifies one non-empty text.
    ///
    /// # Errors
    ///
    /// - [`ClassificationError::EmptyInput`] for blank text.
    /// - Any load or predict error from the model.
    /// - [`ClassificationError::UnrecognizedLabel`] / [`ClassificationError::OutOfRange`]
    ///   when the model label does not name a star count in `1..=5`.
    /// - [`ClassificationError::InvalidConfidence`] when the score is not in `[0, 1]`.
    pub async fn classify(&self, text: &str) -> Result<Classification, ClassificationError> {
        if text.trim().is_empty() {
            return Err(ClassificationError::EmptyInput);
        }
        self.ensure_loaded().await?;

        let prediction = self.model.predict(text).await?;
        let rating = parse_star_label(&prediction.label)?;
        if !(0.0..=1.0).contains(&prediction.score) {
            return Err(ClassificationError::InvalidConfidence(prediction.score));
        }

        Ok(Classification {
            rating,
            label: SentimentLabel::from_rating(rating),
            confidence: prediction.score,
            model_label: prediction.label,
        })
    }
}

/// Reads the star count from a model label such as `"1 star"` or `"5 stars"`.
///
/// # Errors
///
/// [`ClassificationError::UnrecognizedLabel`] when the label does not start
/// with a number; [`ClassificationError::OutOfRange`] when the number is not
/// in `1..=5`.
pub fn parse_star_label(label: &str) -> Result<RatingClass, ClassificationError> {
    let trimmed = label.trim();
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let digits = &trimmed[..digits_end];
    if digits.is_empty() {
        return Err(ClassificationError::UnrecognizedLabel(label.to_owned()));
    }
    // Only overflow can fail here; saturate so it reports as out of range.
    let stars = digits
        .parse::<u64>()
        .ok()
        .and_then(|n| i64::try_from(n).ok())
        .unwrap_or(i64::MAX);
    Ok(RatingClass::try_from(stars)?)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use revsense_core::InvalidRating;

    use super::*;
    use crate::model::Prediction;

    struct FixedModel {
        label: &'static str,
        score: f32,
        loads: AtomicUsize,
        fail_first_load: bool,
    }

    impl FixedModel {
        fn new(label: &'static str, score: f32) -> Self {
            Self {
                label,
                score,
                loads: AtomicUsize::new(0),
                fail_first_load: false,
            }
        }
    }

    #[async_trait]
    impl RatingModel for FixedModel {
        async fn load(&self) -> Result<ModelInfo, ClassificationError> {
            let n = self.loads.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            if self.fail_first_load && n == 0 {
                return Err(ClassificationError::Unavailable("warming up".to_owned()));
            }
            Ok(ModelInfo {
                model_id: "fixed".to_owned(),
                max_input_length: Some(512),
            })
        }

        async fn predict(&self, _text: &str) -> Result<Prediction, ClassificationError> {
            Ok(Prediction {
                label: self.label.to_owned(),
                score: self.score,
            })
        }
    }

    #[test]
    fn parses_star_labels() {
        assert_eq!(parse_star_label("1 star").unwrap().get(), 1);
        assert_eq!(parse_star_label("5 stars").unwrap().get(), 5);
        assert_eq!(parse_star_label(" 3 stars ").unwrap().get(), 3);
        assert_eq!(parse_star_label("4").unwrap().get(), 4);
    }

    #[test]
    fn rejects_labels_without_leading_number() {
        for label in ["POSITIVE", "stars 5", "", "LABEL_4"] {
            assert!(
                matches!(
                    parse_star_label(label),
                    Err(ClassificationError::UnrecognizedLabel(_))
                ),
                "label {label:?}"
            );
        }
    }

    #[test]
    fn rejects_out_of_range_star_counts() {
        assert!(matches!(
            parse_star_label("0 stars"),
            Err(ClassificationError::OutOfRange(_))
        ));
        assert!(matches!(
            parse_star_label("6 stars"),
            Err(ClassificationError::OutOfRange(_))
        ));
    }

    #[test]
    fn overflowing_star_count_is_out_of_range() {
        for label in ["99999999999999999999 stars", "9223372036854775808 stars"] {
            assert!(
                matches!(
                    parse_star_label(label),
                    Err(ClassificationError::OutOfRange(InvalidRating(i64::MAX)))
                ),
                "label {label:?}"
            );
        }
    }

    #[tokio::test]
    async fn classify_maps_rating_to_label() {
        let classifier = SentimentClassifier::new(Arc::new(FixedModel::new("4 stars", 0.62)));
        let c = classifier.classify("Pretty good").await.unwrap();
        assert_eq!(c.rating.get(), 4);
        assert_eq!(c.label, SentimentLabel::Positive);
        assert!((c.confidence - 0.62).abs() < f32::EPSILON);
        assert_eq!(c.model_label, "4 stars");
    }

    #[tokio::test]
    async fn classify_rejects_blank_text_without_loading() {
        let model = Arc::new(FixedModel::new("4 stars", 0.5));
        let classifier = SentimentClassifier::new(model.clone());
        let err = classifier.classify("   ").await.unwrap_err();
        assert!(matches!(err, ClassificationError::EmptyInput));
        assert_eq!(model.loads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn classify_rejects_invalid_confidence() {
        let classifier = SentimentClassifier::new(Arc::new(FixedModel::new("2 stars", 1.5)));
        let err = classifier.classify("meh").await.unwrap_err();
        assert!(matches!(err, ClassificationError::InvalidConfidence(_)));
    }

    #[tokio::test]
    async fn model_loads_once_under_concurrent_first_use() {
        let model = Arc::new(FixedModel::new("5 stars", 0.9));
        let classifier = Arc::new(SentimentClassifier::new(model.clone()));

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let classifier = Arc::clone(&classifier);
                tokio::spawn(async move { classifier.classify(&format!("review {i}")).await })
            })
            .collect();
        for task in tasks {
            task.await.expect("join").expect("classify");
        }

        assert_eq!(model.loads.load(Ordering::SeqCst), 1);
        assert_eq!(
            classifier.model_info().map(|i| i.model_id.as_str()),
            Some("fixed")
        );
    }

    #[tokio::test]
    async fn failed_load_is_retried_on_next_call() {
        let mut fixed = FixedModel::new("3 stars", 0.8);
        fixed.fail_first_load = true;
        let model = Arc::new(fixed);
        let classifier = SentimentClassifier::new(model.clone());

        assert!(matches!(
            classifier.classify("first").await,
            Err(ClassificationError::Unavailable(_))
        ));
        assert!(classifier.model_info().is_none());

        let c = classifier.classify("second").await.unwrap();
        assert_eq!(c.label, SentimentLabel::Average);
        assert_eq!(model.loads.load(Ordering::SeqCst), 2);
    }
}
