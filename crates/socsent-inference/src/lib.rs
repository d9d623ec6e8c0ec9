//! Client for the remote sentiment inference service.
//!
//! The service is a black box: it accepts `{text, model}` and answers with a
//! per-label score map plus the model identifier.

pub mod client;
pub mod error;

pub use client::InferenceClient;
pub use error::InferenceError;
