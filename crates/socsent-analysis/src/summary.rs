//! Per-session sentiment summaries.

use serde::Serialize;

use socsent_core::ReportSettings;
use socsent_db::DocumentStore;

use crate::aggregate::{session_keyword, ScoreTotals};
use crate::error::AnalysisError;

/// Overall tone of a session, judged by its negative share.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentTone {
    PredominantlyPositive,
    ModeratelyNegative,
    HighlyNegative,
}

impl SentimentTone {
    /// Shares below the positive cutoff read as positive, shares below the
    /// negative cutoff as moderate, anything else as highly negative.
    #[must_use]
    pub fn classify(negative_share: f64, settings: &ReportSettings) -> Self {
        if negative_share < settings.positive_share_cutoff {
            Self::PredominantlyPositive
        } else if negative_share < settings.negative_share_cutoff {
            Self::ModeratelyNegative
        } else {
            Self::HighlyNegative
        }
    }

    #[must_use]
    pub fn sentence(self) -> &'static str {
        match self {
            Self::PredominantlyPositive => "This indicates a predominantly positive tone.",
            Self::ModeratelyNegative => "There is a moderate level of negative sentiment.",
            Self::HighlyNegative => "The session contains a high amount of negative content.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub summary: String,
    pub keyword: String,
    /// Average negative score per analysed post.
    pub normalized_score: f64,
}

fn render_summary(keyword: &str, totals: &ScoreTotals, settings: &ReportSettings) -> String {
    let share = totals.negative_share();
    format!(
        "For The Topic: {keyword}, out of {} analyzed posts in this session, \
         the average negative sentiment is {:.4}, \
         and negative content accounts for {:.2}% of the overall sentiment. {}",
        totals.total_posts,
        totals.avg_negative(),
        share * 100.0,
        SentimentTone::classify(share, settings).sentence(),
    )
}

/// Summarizes each session's stored results for the report model.
///
/// Sessions without results are left out; the rest keep request order.
///
/// # Errors
///
/// Returns [`AnalysisError::NotFound`] if no session has results, or
/// [`AnalysisError::Store`] if a store query fails.
pub async fn summarize_sessions<S: DocumentStore>(
    store: &S,
    settings: &ReportSettings,
    session_ids: &[String],
) -> Result<Vec<SessionSummary>, AnalysisError> {
    let mut summaries = Vec::with_capacity(session_ids.len());

    for session_id in session_ids {
        let results = store
            .find_results(session_id, &settings.report_model)
            .await?;
        if results.is_empty() {
            tracing::debug!(session_id = %session_id, "no results for session, omitting");
            continue;
        }

        let totals = ScoreTotals::from_results(&results);
        let keyword = session_keyword(store, session_id).await?;
        summaries.push(SessionSummary {
            session_id: session_id.clone(),
            summary: render_summary(&keyword, &totals, settings),
            keyword,
            normalized_score: totals.avg_negative(),
        });
    }

    if summaries.is_empty() {
        return Err(AnalysisError::NotFound(
            "No sentiment data found for provided session IDs".to_string(),
        ));
    }
    Ok(summaries)
}
