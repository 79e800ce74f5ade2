mod analyze;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use revsense_sentiment::{AnalysisError, ReviewPipeline};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ReviewPipeline>,
    /// Upper bound on one `/analyze` request, end to end.
    pub analysis_timeout: Duration,
    pub sample_size: usize,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    classifier: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
                suggestions: None,
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }

    #[must_use]
    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.error.suggestions = Some(suggestions);
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "not_found" => StatusCode::NOT_FOUND,
            "ambiguous" => StatusCode::UNPROCESSABLE_ENTITY,
            "search_failed" | "fetch_failed" | "classification_failed" => StatusCode::BAD_GATEWAY,
            "timeout" => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Converts a pipeline failure into the API error body.
///
/// Provider and model failures are logged in full but reported to the client
/// with a fixed message.
pub(super) fn map_analysis_error(request_id: String, error: &AnalysisError) -> ApiError {
    let code = error.code();
    match error {
        AnalysisError::Validation(_)
        | AnalysisError::NotFound { .. }
        | AnalysisError::TimedOut { .. } => ApiError::new(request_id, code, error.to_string()),
        AnalysisError::Ambiguous { suggestions } => {
            ApiError::new(request_id, code, error.to_string()).with_suggestions(suggestions.clone())
        }
        AnalysisError::Search(_) => {
            tracing::error!(error = %error, "business search failed");
            ApiError::new(request_id, code, "business search failed")
        }
        AnalysisError::Fetch(_) => {
            tracing::error!(error = %error, "review fetch failed");
            ApiError::new(request_id, code, "review fetch failed")
        }
        AnalysisError::Classification(_) => {
            tracing::error!(error = %error, "sentiment classification failed");
            ApiError::new(request_id, code, "sentiment classification failed")
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/analyze", post(analyze::analyze_business))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

/// Liveness plus whether the sentiment model has been loaded yet. Never
/// triggers a load itself.
async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let data = match state.pipeline.classifier().model_info() {
        Some(info) => HealthData {
            status: "ok",
            classifier: "loaded",
            model: Some(info.model_id.clone()),
        },
        None => HealthData {
            status: "ok",
            classifier: "unloaded",
            model: None,
        },
    };

    (
        StatusCode::OK,
        Json(ApiResponse {
            data,
            meta: ResponseMeta::new(req_id.0),
        }),
    )
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
