//! Presentation-ready view of a [`BusinessAnalysis`], shared by the CLI's
//! `--json` output and the HTTP API.

use revsense_core::{
    ClassifiedReview, PlaceOverview, RatingClass, ResolvedBusiness, SentimentCounts,
    SentimentLabel,
};
use serde::Serialize;

use crate::pipeline::{AnalysisWarning, BusinessAnalysis};

/// Number of sample reviews shown when the caller does not choose.
pub const DEFAULT_SAMPLE_SIZE: usize = 10;

/// Percentage of classified reviews per label, rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelShares {
    #[serde(rename = "POSITIVE")]
    pub positive: f64,
    #[serde(rename = "AVERAGE")]
    pub average: f64,
    #[serde(rename = "NEGATIVE")]
    pub negative: f64,
}

impl LabelShares {
    fn from_counts(counts: &SentimentCounts) -> Self {
        let pct = |label| (counts.share(label) * 10.0).round() / 10.0;
        Self {
            positive: pct(SentimentLabel::Positive),
            average: pct(SentimentLabel::Average),
            negative: pct(SentimentLabel::Negative),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleReview {
    pub label: SentimentLabel,
    pub rating: RatingClass,
    pub confidence: f32,
    pub model_label: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_time: Option<String>,
}

impl SampleReview {
    fn from_review(review: &ClassifiedReview) -> Self {
        Self {
            label: review.label,
            rating: review.rating,
            confidence: review.confidence,
            model_label: review.model_label.clone(),
            text: review.text.clone(),
            author_name: review.metadata.author_name.clone(),
            relative_time: review.metadata.relative_time.clone(),
        }
    }

    /// `Positive (5 stars | 0.93)`
    #[must_use]
    pub fn headline(&self) -> String {
        format!(
            "{} ({} | {:.2})",
            self.label.title(),
            self.model_label,
            self.confidence
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WarningView {
    pub code: AnalysisWarning,
    pub message: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// One-line outcome, e.g. `12 reviews analyzed for: Cafe Riverside`.
    pub message: String,
    pub business: ResolvedBusiness,
    pub place: PlaceOverview,
    pub total: usize,
    pub counts: SentimentCounts,
    pub shares: LabelShares,
    pub samples: Vec<SampleReview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<WarningView>,
}

impl AnalysisReport {
    /// Builds the view with the first `sample_size` classified reviews.
    #[must_use]
    pub fn new(analysis: &BusinessAnalysis, sample_size: usize) -> Self {
        let counts = *analysis.summary.counts();
        let place_name = analysis.place.name.as_str();
        let message = match analysis.warning {
            Some(AnalysisWarning::NoReviews) => format!("No reviews found for: {place_name}"),
            Some(AnalysisWarning::NoReviewText) => {
                format!("No review text to analyze for: {place_name}")
            }
            None => format!("{} reviews analyzed for: {place_name}", counts.total()),
        };

        Self {
            message,
            business: analysis.business.clone(),
            place: analysis.place.clone(),
            total: counts.total(),
            counts,
            shares: LabelShares::from_counts(&counts),
            samples: analysis
                .summary
                .sample(sample_size)
                .iter()
                .map(SampleReview::from_review)
                .collect(),
            warning: analysis.warning.map(|code| WarningView {
                code,
                message: code.message(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use revsense_core::{ReviewMetadata, SentimentSummary};

    use super::*;

    fn classified(text: &str, stars: i64, confidence: f32) -> ClassifiedReview {
        let rating = RatingClass::try_from(stars).unwrap();
        ClassifiedReview {
            text: text.to_owned(),
            label: SentimentLabel::from_rating(rating),
            rating,
            confidence,
            model_label: if stars == 1 {
                "1 star".to_owned()
            } else {
                format!("{stars} stars")
            },
            metadata: ReviewMetadata::default(),
        }
    }

    fn analysis(reviews: Vec<ClassifiedReview>, warning: Option<AnalysisWarning>) -> BusinessAnalysis {
        BusinessAnalysis {
            business: ResolvedBusiness {
                id: "p1".to_owned(),
                display_name: "Cafe Riverside".to_owned(),
                address: None,
            },
            place: PlaceOverview {
                name: "Cafe Riverside".to_owned(),
                rating: Some(4.2),
                user_ratings_total: Some(318),
            },
            summary: SentimentSummary::new(reviews),
            warning,
        }
    }

    #[test]
    fn success_message_counts_classified_reviews() {
        let report = AnalysisReport::new(
            &analysis(
                vec![
                    classified("Great", 5, 0.93),
                    classified("Fine", 3, 0.5),
                    classified("Bad", 1, 0.81),
                ],
                None,
            ),
            10,
        );
        assert_eq!(report.message, "3 reviews analyzed for: Cafe Riverside");
        assert_eq!(report.total, 3);
        assert!((report.shares.positive - 33.3).abs() < 1e-9);
        assert!(report.warning.is_none());
    }

    #[test]
    fn samples_are_capped_and_keep_order() {
        let reviews = (0..15)
            .map(|i| classified(&format!("review {i}"), 4, 0.7))
            .collect();
        let report = AnalysisReport::new(&analysis(reviews, None), DEFAULT_SAMPLE_SIZE);
        assert_eq!(report.samples.len(), 10);
        assert_eq!(report.samples[0].text, "review 0");
        assert_eq!(report.samples[9].text, "review 9");
    }

    #[test]
    fn headline_shows_model_label_and_confidence() {
        let sample = SampleReview::from_review(&classified("Great", 5, 0.926));
        assert_eq!(sample.headline(), "Positive (5 stars | 0.93)");
    }

    #[test]
    fn no_reviews_has_distinct_message_and_warning() {
        let report = AnalysisReport::new(&analysis(Vec::new(), Some(AnalysisWarning::NoReviews)), 10);
        assert_eq!(report.message, "No reviews found for: Cafe Riverside");
        assert!(report.shares.positive.abs() < f64::EPSILON);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["warning"]["code"], "no_reviews");
        assert_eq!(json["counts"]["NEGATIVE"], 0);
    }
}
