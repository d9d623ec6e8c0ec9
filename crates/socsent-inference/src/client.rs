//! HTTP client for the sentiment inference service.
//!
//! Wraps `reqwest` with the service's request shape and status handling. Any
//! non-200 answer is surfaced as [`InferenceError::Status`]; there are no
//! retries.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use serde_json::Value;

use socsent_core::SentimentAnalysis;

use crate::error::InferenceError;

const USER_AGENT: &str = "socsent/0.1 (sentiment-reporting)";

/// Longest response body excerpt kept in [`InferenceError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Serialize)]
struct InferRequest<'a> {
    text: &'a str,
    model: &'a str,
}

/// Client for the inference endpoint.
///
/// Holds one pooled `reqwest::Client`; clone freely.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    client: Client,
    url: Url,
}

impl InferenceClient {
    /// Creates a client that posts to `url` (the full endpoint, e.g.
    /// `http://host:5000/infer`).
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`InferenceError::InvalidUrl`] if `url`
    /// does not parse.
    pub fn new(url: &str, timeout_secs: u64) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;

        let url = Url::parse(url).map_err(|e| InferenceError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, url })
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Sends `text` to the service and returns its JSON answer untouched.
    ///
    /// The caller is responsible for cleaning `text` first.
    ///
    /// # Errors
    ///
    /// - [`InferenceError::Http`] on network failure or timeout.
    /// - [`InferenceError::Status`] if the service answers with anything but 200.
    /// - [`InferenceError::Deserialize`] if the body is not valid JSON.
    pub async fn analyze(&self, text: &str, model: &str) -> Result<Value, InferenceError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(&InferRequest { text, model })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            tracing::warn!(status = status.as_u16(), model, "inference request rejected");
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| InferenceError::Deserialize {
            context: format!("infer(model={model})"),
            source: e,
        })
    }

    /// Like [`InferenceClient::analyze`], but parses the answer into a
    /// [`SentimentAnalysis`] ready to be stored.
    ///
    /// When the service omits `model`, the requested model is recorded.
    ///
    /// # Errors
    ///
    /// Same as [`InferenceClient::analyze`]; additionally
    /// [`InferenceError::Deserialize`] if the answer is not a score object.
    pub async fn analyze_scores(
        &self,
        text: &str,
        model: &str,
    ) -> Result<SentimentAnalysis, InferenceError> {
        let mut body = self.analyze(text, model).await?;
        if let Some(object) = body.as_object_mut() {
            object
                .entry("model")
                .or_insert_with(|| Value::String(model.to_string()));
        }

        serde_json::from_value(body).map_err(|e| InferenceError::Deserialize {
            context: format!("infer(model={model}) scores"),
            source: e,
        })
    }
}
