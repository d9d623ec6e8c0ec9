//! The document-store seam used by the processing and reporting components.

use std::future::Future;

use sqlx::PgPool;

use socsent_core::{PostStatus, ScrapedPost, SentimentResult};

use crate::DbError;

/// Read/write access to scraped posts and their sentiment results.
///
/// Handles are cheap to clone and shared across requests.
pub trait DocumentStore: Clone + Send + Sync + 'static {
    /// Posts of `session_id` still waiting to be processed.
    fn find_unprocessed_posts(
        &self,
        session_id: &str,
    ) -> impl Future<Output = Result<Vec<ScrapedPost>, DbError>> + Send;

    /// Topic keyword recorded for the session, if any.
    fn find_session_keyword(
        &self,
        session_id: &str,
    ) -> impl Future<Output = Result<Option<String>, DbError>> + Send;

    /// Results of `session_id` whose analysis was produced by `model`.
    fn find_results(
        &self,
        session_id: &str,
        model: &str,
    ) -> impl Future<Output = Result<Vec<SentimentResult>, DbError>> + Send;

    /// Stores `result` and marks its post [`PostStatus::Processed`].
    ///
    /// Both writes land together or not at all.
    fn complete_post(
        &self,
        result: &SentimentResult,
    ) -> impl Future<Output = Result<(), DbError>> + Send;

    fn set_post_status(
        &self,
        post_id: i64,
        status: PostStatus,
    ) -> impl Future<Output = Result<(), DbError>> + Send;

    fn health_check(&self) -> impl Future<Output = Result<(), DbError>> + Send;
}

/// [`DocumentStore`] backed by the Postgres pool.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl DocumentStore for PgDocumentStore {
    async fn find_unprocessed_posts(&self, session_id: &str) -> Result<Vec<ScrapedPost>, DbError> {
        crate::posts::find_unprocessed_posts(&self.pool, session_id).await
    }

    async fn find_session_keyword(&self, session_id: &str) -> Result<Option<String>, DbError> {
        crate::posts::find_session_keyword(&self.pool, session_id).await
    }

    async fn find_results(
        &self,
        session_id: &str,
        model: &str,
    ) -> Result<Vec<SentimentResult>, DbError> {
        crate::results::find_results(&self.pool, session_id, model).await
    }

    async fn complete_post(&self, result: &SentimentResult) -> Result<(), DbError> {
        // Dropping the transaction without commit rolls the insert back.
        let mut tx = self.pool.begin().await?;
        let id = crate::results::insert_result(&mut *tx, result).await?;
        crate::posts::set_post_status(&mut *tx, result.raw_id, PostStatus::Processed).await?;
        tx.commit().await?;
        tracing::debug!(result_id = id, raw_id = result.raw_id, "stored sentiment result");
        Ok(())
    }

    async fn set_post_status(&self, post_id: i64, status: PostStatus) -> Result<(), DbError> {
        crate::posts::set_post_status(&self.pool, post_id, status).await
    }

    async fn health_check(&self) -> Result<(), DbError> {
        crate::health_check(&self.pool).await
    }
}
