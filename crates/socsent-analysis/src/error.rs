use thiserror::Error;

use socsent_db::DbError;
use socsent_inference::InferenceError;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The caller supplied input that cannot be analysed.
    #[error("bad input: {0}")]
    BadInput(String),

    /// Nothing matched the requested sessions.
    #[error("{0}")]
    NotFound(String),

    #[error("inference service failure: {0}")]
    Upstream(#[from] InferenceError),

    #[error("document store failure: {0}")]
    Store(#[from] DbError),
}
