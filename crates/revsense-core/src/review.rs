use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A business reference carrying the provider identifier needed to fetch reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedBusiness {
    /// Provider-specific identifier (a Google `place_id`). Opaque to callers.
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub address: Option<String>,
}

/// Place-level details returned alongside the review set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceOverview {
    pub name: String,
    /// Average star rating across all ratings, not just the fetched reviews.
    pub rating: Option<f32>,
    pub user_ratings_total: Option<u32>,
}

/// Provider fields attached to a review. All optional; never used for classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewMetadata {
    pub author_name: Option<String>,
    /// Stars the author gave, as reported by the provider.
    pub author_rating: Option<u8>,
    pub relative_time: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub language: Option<String>,
}

/// An unprocessed review as returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReview {
    /// May be empty or whitespace-only.
    pub text: String,
    #[serde(default)]
    pub metadata: ReviewMetadata,
}

impl RawReview {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: ReviewMetadata::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("rating class {0} is outside 1..=5")]
pub struct InvalidRating(pub i64);

/// A star rating class, always in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct RatingClass(u8);

impl RatingClass {
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for RatingClass {
    type Error = InvalidRating;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(v @ 1..=5) => Ok(Self(v)),
            _ => Err(InvalidRating(value)),
        }
    }
}

impl From<RatingClass> for u8 {
    fn from(r: RatingClass) -> Self {
        r.0
    }
}

impl std::fmt::Display for RatingClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Average,
    Negative,
}

impl SentimentLabel {
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Average,
        SentimentLabel::Negative,
    ];

    /// Maps a star rating class onto the three-way label.
    ///
    /// `4..=5` is positive, `3` is average, `1..=2` is negative.
    #[must_use]
    pub fn from_rating(rating: RatingClass) -> Self {
        match rating.get() {
            4 | 5 => SentimentLabel::Positive,
            3 => SentimentLabel::Average,
            _ => SentimentLabel::Negative,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Average => "Average",
            SentimentLabel::Negative => "Negative",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "POSITIVE"),
            SentimentLabel::Average => write!(f, "AVERAGE"),
            SentimentLabel::Negative => write!(f, "NEGATIVE"),
        }
    }
}

/// A review with its model-derived sentiment. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedReview {
    /// Trimmed review text.
    pub text: String,
    pub label: SentimentLabel,
    pub rating: RatingClass,
    /// Model confidence in `[0, 1]`.
    pub confidence: f32,
    /// The model's own label, e.g. `"4 stars"`.
    pub model_label: String,
    pub metadata: ReviewMetadata,
}
