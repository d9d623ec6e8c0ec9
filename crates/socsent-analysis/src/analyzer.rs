use serde_json::Value;

use socsent_core::ReportSettings;
use socsent_inference::InferenceClient;

use crate::error::AnalysisError;
use crate::text::clean_text;

/// Cleans `text` and returns the inference service's answer verbatim.
///
/// `model` falls back to the configured default model.
///
/// # Errors
///
/// - [`AnalysisError::BadInput`] if `text` is empty or whitespace-only.
/// - [`AnalysisError::Upstream`] if the inference call fails.
pub async fn analyze_text(
    inference: &InferenceClient,
    settings: &ReportSettings,
    text: &str,
    model: Option<&str>,
) -> Result<Value, AnalysisError> {
    if text.trim().is_empty() {
        return Err(AnalysisError::BadInput("Input text is empty.".to_string()));
    }

    let model = model
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(&settings.default_model);
    let cleaned = clean_text(text);
    tracing::debug!(model, words = cleaned.split(' ').count(), "analysing text");

    Ok(inference.analyze(&cleaned, model).await?)
}
