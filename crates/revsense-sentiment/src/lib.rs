//! Review sentiment pipeline for revsense.
//!
//! Resolves a business through Google Places, fetches its reviews, classifies
//! each review with a star-rating model served by Text Embeddings Inference,
//! and folds the results into per-label counts.

pub mod aggregator;
pub mod classifier;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod tei;

pub use aggregator::aggregate;
pub use classifier::{parse_star_label, Classification, SentimentClassifier};
pub use error::{AnalysisError, ClassificationError, SetupError, Stage};
pub use model::{ModelInfo, Prediction, RatingModel};
pub use pipeline::{AnalysisWarning, BusinessAnalysis, ReviewPipeline};
pub use report::{AnalysisReport, LabelShares, SampleReview, WarningView, DEFAULT_SAMPLE_SIZE};
pub use tei::TeiRatingModel;
