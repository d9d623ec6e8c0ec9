mod analysis;
mod process;
mod reports;

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use socsent_analysis::AnalysisError;
use socsent_core::ReportSettings;
use socsent_db::DocumentStore;
use socsent_inference::InferenceClient;

use crate::middleware::{
    enforce_rate_limit, request_id, require_token, RateLimitState, TokenValidator,
};

/// Handles shared by every request.
#[derive(Clone)]
pub struct AppState<S> {
    pub store: S,
    pub inference: InferenceClient,
    pub settings: Arc<ReportSettings>,
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
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
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
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "bad_request" => StatusCode::BAD_REQUEST,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_analysis_error(request_id: String, error: &AnalysisError) -> ApiError {
    match error {
        AnalysisError::BadInput(message) => ApiError::new(request_id, "bad_request", message),
        AnalysisError::NotFound(message) => ApiError::new(request_id, "not_found", message),
        AnalysisError::Upstream(e) => {
            tracing::error!(error = %e, "inference request failed");
            ApiError::new(
                request_id,
                "upstream_error",
                "sentiment inference service failed",
            )
        }
        AnalysisError::Store(e) => {
            tracing::error!(error = %e, "database query failed");
            ApiError::new(request_id, "internal_error", "database query failed")
        }
    }
}

pub(super) fn bad_json(request_id: String, rejection: &JsonRejection) -> ApiError {
    ApiError::new(request_id, "bad_request", rejection.body_text())
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
}

fn protected_router<S: DocumentStore>(
    validator: TokenValidator,
    rate_limit: RateLimitState,
) -> Router<AppState<S>> {
    Router::new()
        .route(
            "/process-session/{session_id}",
            post(process::process_session::<S>),
        )
        .route(
            "/anlaysis-sentiment",
            post(analysis::analyze_sentiment::<S>),
        )
        .route(
            "/session-sentiment-summary",
            post(reports::session_summary::<S>),
        )
        .route(
            "/session-sentiment-ranking",
            post(reports::session_ranking::<S>),
        )
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    rate_limit,
                    enforce_rate_limit,
                ))
                .layer(axum::middleware::from_fn_with_state(
                    validator,
                    require_token,
                )),
        )
}

pub fn build_app<S: DocumentStore>(
    state: AppState<S>,
    validator: TokenValidator,
    rate_limit: RateLimitState,
) -> Router {
    let public_routes = Router::new().route("/health", get(health::<S>));

    Router::new()
        .merge(public_routes)
        .merge(protected_router(validator, rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health<S: DocumentStore>(State(state): State<AppState<S>>) -> impl IntoResponse {
    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthData {
                status: "ok",
                database: "ok",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthData {
                    status: "degraded",
                    database: "unavailable",
                }),
            )
        }
    }
}
