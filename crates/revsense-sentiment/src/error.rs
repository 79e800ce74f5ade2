use revsense_core::{InvalidRating, ValidationError};
use revsense_places::{PlacesError, ResolveError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("classifier unavailable: {0}")]
    Unavailable(String),

    #[error("malformed classifier response: {0}")]
    Malformed(String),

    #[error("unrecognized model label '{0}'")]
    UnrecognizedLabel(String),

    #[error(transparent)]
    OutOfRange(#[from] InvalidRating),

    #[error("confidence {0} is outside [0, 1]")]
    InvalidConfidence(f32),

    #[error("cannot classify empty text")]
    EmptyInput,
}

/// Pipeline stage, reported when a deadline cuts a run short.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolve,
    Fetch,
    Classify,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Resolve => write!(f, "resolve"),
            Stage::Fetch => write!(f, "fetch"),
            Stage::Classify => write!(f, "classify"),
        }
    }
}

/// Every way an analysis request can fail. Kinds stay distinct all the way
/// to the caller.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("business not found for '{query}'; try refining the name")]
    NotFound { query: String },

    #[error("no exact match; did you mean: {}", .suggestions.join(", "))]
    Ambiguous { suggestions: Vec<String> },

    #[error("business search failed: {0}")]
    Search(#[source] PlacesError),

    #[error("review fetch failed: {0}")]
    Fetch(#[source] PlacesError),

    #[error("sentiment classification failed: {0}")]
    Classification(#[from] ClassificationError),

    #[error("analysis deadline passed before the {stage} stage")]
    TimedOut { stage: Stage },
}

impl AnalysisError {
    /// Stable machine-readable code for this error kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            AnalysisError::Validation(_) => "validation_error",
            AnalysisError::NotFound { .. } => "not_found",
            AnalysisError::Ambiguous { .. } => "ambiguous",
            AnalysisError::Search(_) => "search_failed",
            AnalysisError::Fetch(_) => "fetch_failed",
            AnalysisError::Classification(_) => "classification_failed",
            AnalysisError::TimedOut { .. } => "timeout",
        }
    }
}

impl From<ResolveError> for AnalysisError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NotFound { query } => AnalysisError::NotFound { query },
            ResolveError::Ambiguous { suggestions } => AnalysisError::Ambiguous { suggestions },
            ResolveError::Provider(e) => AnalysisError::Search(e),
        }
    }
}

/// Failure to construct a pipeline from configuration.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("places client: {0}")]
    Places(#[from] PlacesError),

    #[error("classifier: {0}")]
    Classifier(#[from] ClassificationError),
}
