use serde::Serialize;

use crate::review::{ClassifiedReview, SentimentLabel};

/// Per-label review counts. All three labels are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    #[serde(rename = "POSITIVE")]
    pub positive: usize,
    #[serde(rename = "AVERAGE")]
    pub average: usize,
    #[serde(rename = "NEGATIVE")]
    pub negative: usize,
}

impl SentimentCounts {
    #[must_use]
    pub fn get(&self, label: SentimentLabel) -> usize {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Average => self.average,
            SentimentLabel::Negative => self.negative,
        }
    }

    pub fn increment(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Average => self.average += 1,
            SentimentLabel::Negative => self.negative += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.positive + self.average + self.negative
    }

    /// Percentage of reviews carrying `label`, in `[0, 100]`. `0.0` when empty.
    #[must_use]
    pub fn share(&self, label: SentimentLabel) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let pct = self.get(label) as f64 * 100.0 / total as f64;
        pct
    }
}

/// Classified reviews in provider order plus their label counts.
///
/// Counts are derived from the reviews at construction, so
/// `counts().total() == reviews().len()` always holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SentimentSummary {
    counts: SentimentCounts,
    reviews: Vec<ClassifiedReview>,
}

impl SentimentSummary {
    #[must_use]
    pub fn new(reviews: Vec<ClassifiedReview>) -> Self {
        let mut counts = SentimentCounts::default();
        for review in &reviews {
            counts.increment(review.label);
        }
        Self { counts, reviews }
    }

    #[must_use]
    pub fn counts(&self) -> &SentimentCounts {
        &self.counts
    }

    #[must_use]
    pub fn reviews(&self) -> &[ClassifiedReview] {
        &self.reviews
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// The first `n` classified reviews, in output order.
    #[must_use]
    pub fn sample(&self, n: usize) -> &[ClassifiedReview] {
        &self.reviews[..n.min(self.reviews.len())]
    }
}
