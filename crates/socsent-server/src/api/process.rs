use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;

use socsent_analysis::ProcessOutcome;
use socsent_db::DocumentStore;

use crate::middleware::{Claims, RequestId};

use super::{map_analysis_error, ApiError, AppState};

#[derive(Debug, Serialize)]
pub(super) struct ProcessResponse {
    pub message: String,
    pub posts_processed: usize,
    pub total_attempted: usize,
}

impl From<ProcessOutcome> for ProcessResponse {
    fn from(outcome: ProcessOutcome) -> Self {
        Self {
            message: outcome.message(),
            posts_processed: outcome.posts_processed,
            total_attempted: outcome.total_attempted,
        }
    }
}

pub(super) async fn process_session<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Extension(req_id): Extension<RequestId>,
    Extension(claims): Extension<Claims>,
    Path(session_id): Path<String>,
) -> Result<Json<ProcessResponse>, ApiError> {
    tracing::info!(
        session_id = %session_id,
        subject = claims.subject().unwrap_or("-"),
        "process session requested"
    );

    let outcome = socsent_analysis::process_session(
        &state.store,
        &state.inference,
        &state.settings,
        &session_id,
    )
    .await
    .map_err(|e| map_analysis_error(req_id.0, &e))?;

    Ok(Json(outcome.into()))
}
