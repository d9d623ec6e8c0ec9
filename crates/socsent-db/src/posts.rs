//! Database operations for the `scraped_posts` table.
//!
//! Rows are owned by the ingestion system. This service reads them and moves
//! `status` to a terminal value; nothing else is written.

use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};

use socsent_core::{Platform, PostStatus, ScrapedPost};

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `scraped_posts` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ScrapedPostRow {
    pub id: i64,
    pub session_id: String,
    pub platform: String,
    pub text: Option<String>,
    pub metadata: Option<String>,
    pub content: Option<String>,
    pub keyword: Option<String>,
    pub datetime: Option<DateTime<Utc>>,
    pub status: i16,
}

impl TryFrom<ScrapedPostRow> for ScrapedPost {
    type Error = DbError;

    fn try_from(row: ScrapedPostRow) -> Result<Self, Self::Error> {
        let status = PostStatus::try_from(row.status)
            .map_err(|e| DbError::InvalidRow(format!("scraped_posts.id={}: {e}", row.id)))?;

        Ok(ScrapedPost {
            id: row.id,
            session_id: row.session_id,
            platform: Platform::from(row.platform),
            text: row.text,
            metadata: row.metadata,
            content: row.content,
            keyword: row.keyword,
            datetime: row.datetime,
            status,
        })
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns every post of a session still in [`PostStatus::Unprocessed`], oldest id first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails, or [`DbError::InvalidRow`]
/// if a row cannot be converted into a [`ScrapedPost`].
pub async fn find_unprocessed_posts(
    pool: &PgPool,
    session_id: &str,
) -> Result<Vec<ScrapedPost>, DbError> {
    let rows = sqlx::query_as::<_, ScrapedPostRow>(
        "SELECT id, session_id, platform, text, metadata, content, keyword, datetime, status \
         FROM scraped_posts \
         WHERE session_id = $1 AND status = $2 \
         ORDER BY id",
    )
    .bind(session_id)
    .bind(PostStatus::Unprocessed.code())
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(ScrapedPost::try_from).collect()
}

/// Returns the topic keyword recorded for a session, if any post carries one.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_session_keyword(
    pool: &PgPool,
    session_id: &str,
) -> Result<Option<String>, DbError> {
    let keyword = sqlx::query_scalar::<_, String>(
        "SELECT keyword FROM scraped_posts \
         WHERE session_id = $1 AND keyword IS NOT NULL \
         ORDER BY id \
         LIMIT 1",
    )
    .bind(session_id)
    .fetch_optional(pool)
    .await?;

    Ok(keyword)
}

/// Sets the processing status of one post.
///
/// Accepts the pool or an open transaction.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no post has `post_id`, or
/// [`DbError::Sqlx`] if the update fails.
pub async fn set_post_status<'e, E>(
    executor: E,
    post_id: i64,
    status: PostStatus,
) -> Result<(), DbError>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query("UPDATE scraped_posts SET status = $2 WHERE id = $1")
        .bind(post_id)
        .bind(status.code())
        .execute(executor)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }

    Ok(())
}
