use crate::AppConfig;

pub const DEFAULT_MODEL: &str = "sentiment-v3";
pub const DEFAULT_POSITIVE_SHARE_CUTOFF: f64 = 0.2;
pub const DEFAULT_NEGATIVE_SHARE_CUTOFF: f64 = 0.5;
pub const DEFAULT_MIN_POSTS: usize = 3;

/// Business rules shared by the analyzer, summarizer and ranker.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    /// Model requested when a caller does not name one.
    pub default_model: String,
    /// Only results produced by this model are aggregated.
    pub report_model: String,
    /// Negative share below this reads as a predominantly positive tone.
    pub positive_share_cutoff: f64,
    /// Negative share at or above this reads as highly negative.
    pub negative_share_cutoff: f64,
    /// Sessions with fewer results are left out of rankings.
    pub min_posts: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            default_model: DEFAULT_MODEL.to_string(),
            report_model: DEFAULT_MODEL.to_string(),
            positive_share_cutoff: DEFAULT_POSITIVE_SHARE_CUTOFF,
            negative_share_cutoff: DEFAULT_NEGATIVE_SHARE_CUTOFF,
            min_posts: DEFAULT_MIN_POSTS,
        }
    }
}

impl ReportSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            default_model: config.default_model.clone(),
            report_model: config.report_model.clone(),
            positive_share_cutoff: config.positive_share_cutoff,
            negative_share_cutoff: config.negative_share_cutoff,
            min_posts: config.ranking_min_posts,
        }
    }
}
