use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::Value;

use socsent_db::DocumentStore;

use crate::middleware::RequestId;

use super::{bad_json, map_analysis_error, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct TextInput {
    pub text: String,
    #[serde(default)]
    pub model: Option<String>,
}

pub(super) async fn analyze_sentiment<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<TextInput>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(input) = payload.map_err(|e| bad_json(req_id.0.clone(), &e))?;

    let result = socsent_analysis::analyze_text(
        &state.inference,
        &state.settings,
        &input.text,
        input.model.as_deref(),
    )
    .await
    .map_err(|e| map_analysis_error(req_id.0, &e))?;

    Ok(Json(result))
}
