//! Shared domain types and configuration for revsense.

pub mod app_config;
pub mod config;
pub mod query;
pub mod review;
pub mod summary;

use thiserror::Error;

pub use app_config::{AppConfig, ClassifierConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, load_classifier_config};
pub use query::{BusinessQuery, ValidationError};
pub use review::{
    ClassifiedReview, InvalidRating, PlaceOverview, RatingClass, RawReview, ResolvedBusiness,
    ReviewMetadata, SentimentLabel,
};
pub use summary::{SentimentCounts, SentimentSummary};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
