//! Database operations for the `sentiment_results` table.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{types::Json, PgExecutor, PgPool};

use socsent_core::{Platform, PostStatus, SentimentAnalysis, SentimentResult};

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `sentiment_results` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SentimentResultRow {
    pub id: i64,
    pub raw_id: i64,
    pub session_id: String,
    pub platform: String,
    pub text: String,
    pub hashtags: Vec<String>,
    /// Inference payload as returned by the service, stored as JSONB.
    pub analysis: Value,
    pub datetime: Option<DateTime<Utc>>,
    pub status: i16,
}

impl TryFrom<SentimentResultRow> for SentimentResult {
    type Error = DbError;

    fn try_from(row: SentimentResultRow) -> Result<Self, Self::Error> {
        let analysis: SentimentAnalysis = serde_json::from_value(row.analysis).map_err(|e| {
            DbError::InvalidRow(format!("sentiment_results.id={} analysis: {e}", row.id))
        })?;
        let status = PostStatus::try_from(row.status)
            .map_err(|e| DbError::InvalidRow(format!("sentiment_results.id={}: {e}", row.id)))?;

        Ok(SentimentResult {
            raw_id: row.raw_id,
            session_id: row.session_id,
            platform: Platform::from(row.platform),
            text: row.text,
            hashtags: row.hashtags,
            analysis,
            datetime: row.datetime,
            status,
        })
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns the stored results of a session produced by `model`, in insert order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails, or [`DbError::InvalidRow`]
/// if a stored analysis document is malformed.
pub async fn find_results(
    pool: &PgPool,
    session_id: &str,
    model: &str,
) -> Result<Vec<SentimentResult>, DbError> {
    let rows = sqlx::query_as::<_, SentimentResultRow>(
        "SELECT id, raw_id, session_id, platform, text, hashtags, analysis, datetime, status \
         FROM sentiment_results \
         WHERE session_id = $1 AND analysis->>'model' = $2 \
         ORDER BY id",
    )
    .bind(session_id)
    .bind(model)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(SentimentResult::try_from).collect()
}

/// Inserts one result and returns its generated id.
///
/// `raw_id` is unique, so a second insert for the same post fails. Accepts
/// the pool or an open transaction.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_result<'e, E>(executor: E, result: &SentimentResult) -> Result<i64, DbError>
where
    E: PgExecutor<'e>,
{
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO sentiment_results \
             (raw_id, session_id, platform, text, hashtags, analysis, datetime, status) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         RETURNING id",
    )
    .bind(result.raw_id)
    .bind(&result.session_id)
    .bind(result.platform.as_str())
    .bind(&result.text)
    .bind(&result.hashtags)
    .bind(Json(&result.analysis))
    .bind(result.datetime)
    .bind(result.status.code())
    .fetch_one(executor)
    .await?;

    Ok(id)
}
