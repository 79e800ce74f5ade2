//! Resolve → fetch → classify orchestration.

use std::sync::Arc;

use revsense_core::{AppConfig, BusinessQuery, PlaceOverview, ResolvedBusiness, SentimentSummary};
use revsense_places::PlacesClient;
use serde::Serialize;
use tokio::time::Instant;

use crate::aggregator::aggregate;
use crate::classifier::SentimentClassifier;
use crate::error::{AnalysisError, SetupError, Stage};
use crate::tei::TeiRatingModel;

/// A successful but empty outcome. Not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisWarning {
    /// The place exists but the provider returned no reviews.
    NoReviews,
    /// Reviews came back but every one had blank text.
    NoReviewText,
}

impl AnalysisWarning {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            AnalysisWarning::NoReviews => "no reviews found for this business",
            AnalysisWarning::NoReviewText => "reviews were found but none contained text",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BusinessAnalysis {
    pub business: ResolvedBusiness,
    pub place: PlaceOverview,
    pub summary: SentimentSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<AnalysisWarning>,
}

/// Runs one business through resolution, review retrieval and
/// classification. Holds no per-request state, so one instance can serve
/// concurrent runs.
pub struct ReviewPipeline {
    places: PlacesClient,
    classifier: Arc<SentimentClassifier>,
    concurrency: usize,
}

impl ReviewPipeline {
    #[must_use]
    pub fn new(
        places: PlacesClient,
        classifier: Arc<SentimentClassifier>,
        concurrency: usize,
    ) -> Self {
        Self {
            places,
            classifier,
            concurrency: concurrency.max(1),
        }
    }

    /// Builds the production pipeline: Google Places plus a TEI-hosted model.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] if either HTTP client cannot be constructed.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, SetupError> {
        let places = PlacesClient::from_app_config(config)?;
        let model = TeiRatingModel::new(&config.classifier_url, config.request_timeout_secs)?
            .with_expected_model(config.classifier_model.clone());
        let classifier = Arc::new(SentimentClassifier::new(Arc::new(model)));
        Ok(Self::new(places, classifier, config.classify_concurrency))
    }

    #[must_use]
    pub fn classifier(&self) -> &Arc<SentimentClassifier> {
        &self.classifier
    }

    /// Validates the raw inputs, then runs the pipeline.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::Validation`] for a blank name (no network call is
    /// made), otherwise see [`ReviewPipeline::run`].
    pub async fn analyze_business(
        &self,
        name: &str,
        location_hint: Option<&str>,
    ) -> Result<BusinessAnalysis, AnalysisError> {
        let query = BusinessQuery::new(name, location_hint)?;
        self.run(&query).await
    }

    /// Runs all stages in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the [`AnalysisError`] of the failing stage.
    pub async fn run(&self, query: &BusinessQuery) -> Result<BusinessAnalysis, AnalysisError> {
        self.run_with_deadline(query, None).await
    }

    /// Like [`ReviewPipeline::run`], but refuses to start a stage once
    /// `deadline` has passed.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::TimedOut`] naming the stage that was not started, or
    /// the error of the failing stage.
    pub async fn run_with_deadline(
        &self,
        query: &BusinessQuery,
        deadline: Option<Instant>,
    ) -> Result<BusinessAnalysis, AnalysisError> {
        check_deadline(deadline, Stage::Resolve)?;
        let business = self.places.resolve_business(query).await?;

        check_deadline(deadline, Stage::Fetch)?;
        let fetched = self
            .places
            .fetch_reviews(&business)
            .await
            .map_err(AnalysisError::Fetch)?;

        check_deadline(deadline, Stage::Classify)?;
        let summary = aggregate(&self.classifier, &fetched.reviews, self.concurrency).await?;

        let warning = if fetched.reviews.is_empty() {
            Some(AnalysisWarning::NoReviews)
        } else if summary.is_empty() {
            Some(AnalysisWarning::NoReviewText)
        } else {
            None
        };
        if let Some(warning) = warning {
            tracing::info!(place_id = %business.id, ?warning, "analysis produced no classified reviews");
        }

        Ok(BusinessAnalysis {
            business,
            place: fetched.place,
            summary,
            warning,
        })
    }
}

fn check_deadline(deadline: Option<Instant>, stage: Stage) -> Result<(), AnalysisError> {
    match deadline {
        Some(deadline) if Instant::now() >= deadline => {
            tracing::warn!(%stage, "analysis deadline passed");
            Err(AnalysisError::TimedOut { stage })
        }
        _ => Ok(()),
    }
}
