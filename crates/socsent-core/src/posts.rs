use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Social platform a post was scraped from.
///
/// Parsing is case-insensitive. Platforms this service has no text mapping
/// for are kept verbatim in [`Platform::Other`] so they round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    Twitter,
    Youtube,
    Reddit,
    Other(String),
}

impl Platform {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Youtube => "youtube",
            Platform::Reddit => "reddit",
            Platform::Other(raw) => raw,
        }
    }
}

impl From<&str> for Platform {
    fn from(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "twitter" => Platform::Twitter,
            "youtube" => Platform::Youtube,
            "reddit" => Platform::Reddit,
            _ => Platform::Other(raw.to_string()),
        }
    }
}

impl From<String> for Platform {
    fn from(raw: String) -> Self {
        Platform::from(raw.as_str())
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.as_str().to_string()
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Processing state of a scraped post.
///
/// Stored as the integer codes the ingestion system writes: `1`, `3`, `4`.
/// A post moves from `Unprocessed` to exactly one of the terminal states per
/// processing attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i16", try_from = "i16")]
pub enum PostStatus {
    Unprocessed,
    Processed,
    Failed,
}

impl PostStatus {
    #[must_use]
    pub fn code(self) -> i16 {
        match self {
            PostStatus::Unprocessed => 1,
            PostStatus::Processed => 3,
            PostStatus::Failed => 4,
        }
    }
}

impl TryFrom<i16> for PostStatus {
    type Error = CoreError;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(PostStatus::Unprocessed),
            3 => Ok(PostStatus::Processed),
            4 => Ok(PostStatus::Failed),
            other => Err(CoreError::UnknownStatus(other)),
        }
    }
}

impl From<PostStatus> for i16 {
    fn from(status: PostStatus) -> Self {
        status.code()
    }
}

/// A post collected by the ingestion system.
///
/// Only one payload field is populated, depending on the platform:
/// `text` for Twitter, `metadata` for `YouTube`, `content` for Reddit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapedPost {
    pub id: i64,
    pub session_id: String,
    pub platform: Platform,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub metadata: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    /// Topic the session was scraped for.
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub datetime: Option<DateTime<Utc>>,
    pub status: PostStatus,
}

pub const NEGATIVE_LABEL: &str = "Negative";
pub const POSITIVE_LABEL: &str = "Positive";
pub const NEUTRAL_LABEL: &str = "Neutral";

/// Per-label scores returned by the inference service.
///
/// Scores are not guaranteed to sum to 1. Missing labels read as `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SentimentScores(pub BTreeMap<String, f64>);

impl SentimentScores {
    #[must_use]
    pub fn get(&self, label: &str) -> f64 {
        self.0.get(label).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn negative(&self) -> f64 {
        self.get(NEGATIVE_LABEL)
    }

    #[must_use]
    pub fn positive(&self) -> f64 {
        self.get(POSITIVE_LABEL)
    }

    #[must_use]
    pub fn neutral(&self) -> f64 {
        self.get(NEUTRAL_LABEL)
    }
}

impl<const N: usize> From<[(&str, f64); N]> for SentimentScores {
    fn from(pairs: [(&str, f64); N]) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(label, score)| (label.to_string(), score))
                .collect(),
        )
    }
}

/// The inference payload stored with each result.
///
/// Fields beyond `model` and `scores` are kept in `extra` so the stored
/// document matches what the service returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    pub model: String,
    #[serde(default)]
    pub scores: SentimentScores,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SentimentAnalysis {
    #[must_use]
    pub fn new(model: impl Into<String>, scores: SentimentScores) -> Self {
        Self {
            model: model.into(),
            scores,
            extra: serde_json::Map::new(),
        }
    }
}

/// Sentiment analysis persisted for one successfully processed post.
///
/// Written once and never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Id of the [`ScrapedPost`] this result was produced from.
    pub raw_id: i64,
    pub session_id: String,
    pub platform: Platform,
    /// Original post text, before cleaning.
    pub text: String,
    pub hashtags: Vec<String>,
    pub analysis: SentimentAnalysis,
    pub datetime: Option<DateTime<Utc>>,
    pub status: PostStatus,
}
