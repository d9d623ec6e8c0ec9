use thiserror::Error;

/// Errors returned by the inference service client.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a status other than 200.
    #[error("inference API returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid inference URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}
