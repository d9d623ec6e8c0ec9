//! Summary and ranking reports over stored sentiment results.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Extension, Json,
};
use serde::Deserialize;

use socsent_analysis::{SessionRanking, SessionSummary};
use socsent_db::DocumentStore;

use crate::middleware::RequestId;

use super::{bad_json, map_analysis_error, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct SessionRequest {
    pub session_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RankingQuery {
    pub min_posts: Option<usize>,
}

pub(super) async fn session_summary<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<SessionRequest>, JsonRejection>,
) -> Result<Json<Vec<SessionSummary>>, ApiError> {
    let Json(request) = payload.map_err(|e| bad_json(req_id.0.clone(), &e))?;

    let summaries =
        socsent_analysis::summarize_sessions(&state.store, &state.settings, &request.session_ids)
            .await
            .map_err(|e| map_analysis_error(req_id.0, &e))?;

    Ok(Json(summaries))
}

pub(super) async fn session_ranking<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<RankingQuery>, QueryRejection>,
    payload: Result<Json<SessionRequest>, JsonRejection>,
) -> Result<Json<SessionRanking>, ApiError> {
    let Query(query) = query.map_err(|e| {
        ApiError::new(req_id.0.clone(), "bad_request", e.body_text())
    })?;
    let Json(request) = payload.map_err(|e| bad_json(req_id.0.clone(), &e))?;

    let ranking = socsent_analysis::rank_sessions(
        &state.store,
        &state.settings,
        &request.session_ids,
        query.min_posts,
    )
    .await
    .map_err(|e| map_analysis_error(req_id.0, &e))?;

    Ok(Json(ranking))
}
