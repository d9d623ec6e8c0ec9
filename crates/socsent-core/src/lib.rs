//! Shared domain types and configuration for socsent.

pub mod app_config;
pub mod config;
pub mod posts;
pub mod report;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use posts::{
    Platform, PostStatus, ScrapedPost, SentimentAnalysis, SentimentResult, SentimentScores,
};
pub use report::ReportSettings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown post status code: {0}")]
    UnknownStatus(i16),
}
