//! Sentiment processing and reporting for socsent.
//!
//! Processes unprocessed posts of a session through the remote inference
//! service, analyses ad-hoc text, and aggregates stored results into
//! per-session summaries and cross-session rankings.

pub mod aggregate;
pub mod analyzer;
pub mod error;
pub mod processor;
pub mod ranking;
pub mod summary;
pub mod text;

pub use aggregate::ScoreTotals;
pub use analyzer::analyze_text;
pub use error::AnalysisError;
pub use processor::{process_session, ProcessOutcome};
pub use ranking::{rank_sessions, RankingExtremes, SessionAggregate, SessionRanking, SkippedSession};
pub use summary::{summarize_sessions, SentimentTone, SessionSummary};
pub use text::{clean_text, extract_hashtags, extract_text_by_platform, MAX_CLEAN_WORDS};

#[cfg(test)]
pub(crate) mod test_support;
