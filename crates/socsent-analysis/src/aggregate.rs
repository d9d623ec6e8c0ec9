//! Score aggregation shared by the summarizer and the ranker.

use socsent_core::SentimentResult;
use socsent_db::{DbError, DocumentStore};

/// Keyword reported for sessions whose posts carry none.
pub const UNKNOWN_KEYWORD: &str = "Unknown";

/// Per-label score sums over a session's results.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreTotals {
    pub total_posts: usize,
    pub negative: f64,
    pub positive: f64,
    pub neutral: f64,
}

impl ScoreTotals {
    #[must_use]
    pub fn from_results(results: &[SentimentResult]) -> Self {
        results.iter().fold(Self::default(), |mut acc, result| {
            let scores = &result.analysis.scores;
            acc.total_posts += 1;
            acc.negative += scores.negative();
            acc.positive += scores.positive();
            acc.neutral += scores.neutral();
            acc
        })
    }

    #[must_use]
    pub fn avg_negative(&self) -> f64 {
        self.per_post(self.negative)
    }

    #[must_use]
    pub fn avg_positive(&self) -> f64 {
        self.per_post(self.positive)
    }

    #[must_use]
    pub fn avg_neutral(&self) -> f64 {
        self.per_post(self.neutral)
    }

    /// Fraction of the combined negative and positive mass that is negative.
    ///
    /// `0.0` when both sums are zero.
    #[must_use]
    pub fn negative_share(&self) -> f64 {
        let denom = self.negative + self.positive;
        if denom > 0.0 {
            self.negative / denom
        } else {
            0.0
        }
    }

    fn per_post(&self, sum: f64) -> f64 {
        if self.total_posts == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let denom = self.total_posts as f64;
        sum / denom
    }
}

/// Rounds to 4 decimal places.
#[must_use]
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Looks up the session keyword, falling back to [`UNKNOWN_KEYWORD`].
///
/// # Errors
///
/// Returns [`DbError`] if the store query fails.
pub async fn session_keyword<S: DocumentStore>(
    store: &S,
    session_id: &str,
) -> Result<String, DbError> {
    Ok(store
        .find_session_keyword(session_id)
        .await?
        .unwrap_or_else(|| UNKNOWN_KEYWORD.to_string()))
}
