use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use revsense_core::BusinessQuery;
use revsense_sentiment::{AnalysisError, AnalysisReport};
use serde::Deserialize;
use tokio::time::Instant;

use crate::middleware::RequestId;

use super::{map_analysis_error, ApiError, ApiResponse, AppState, ResponseMeta};

/// Upper bound on `samples` in a request body.
const MAX_SAMPLES: usize = 50;

#[derive(Debug, Deserialize)]
pub(super) struct AnalyzeRequest {
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub samples: Option<usize>,
}

/// Deadline `timeout` from now, or `None` when it does not fit the clock.
pub(super) fn deadline_after(timeout: Duration) -> Option<Instant> {
    Instant::now().checked_add(timeout)
}

pub(super) async fn analyze_business(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<AnalysisReport>>, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        ApiError::new(req_id.0.clone(), "bad_request", rejection.body_text())
    })?;

    let query = BusinessQuery::new(&body.name, body.location.as_deref())
        .map_err(|e| map_analysis_error(req_id.0.clone(), &AnalysisError::from(e)))?;
    let sample_size = body.samples.unwrap_or(state.sample_size).min(MAX_SAMPLES);

    let outcome = match deadline_after(state.analysis_timeout) {
        Some(deadline) => {
            tokio::time::timeout_at(
                deadline,
                state.pipeline.run_with_deadline(&query, Some(deadline)),
            )
            .await
        }
        None => {
            tracing::debug!("analysis timeout exceeds the clock range, running without deadline");
            Ok(state.pipeline.run_with_deadline(&query, None).await)
        }
    };

    let analysis = match outcome {
        Ok(result) => result.map_err(|e| map_analysis_error(req_id.0.clone(), &e))?,
        Err(_) => {
            tracing::warn!(
                query = %query.search_text(),
                timeout_secs = state.analysis_timeout.as_secs(),
                "analysis timed out"
            );
            return Err(ApiError::new(
                req_id.0,
                "timeout",
                format!(
                    "analysis did not finish within {}s",
                    state.analysis_timeout.as_secs()
                ),
            ));
        }
    };

    Ok(Json(ApiResponse {
        data: AnalysisReport::new(&analysis, sample_size),
        meta: ResponseMeta::new(req_id.0),
    }))
}
