//! In-process [`DocumentStore`] for tests, with switches that inject store
//! failures. Only built under `cfg(test)` or the `test-util` feature.

use std::sync::Arc;

use tokio::sync::Mutex;

use socsent_core::{PostStatus, ScrapedPost, SentimentResult};

use crate::{DbError, DocumentStore};

#[derive(Debug, Default)]
struct Collections {
    posts: Vec<ScrapedPost>,
    results: Vec<SentimentResult>,
    fail_result_inserts: bool,
    fail_status: Option<PostStatus>,
    offline: bool,
}

/// Shared, cloneable in-memory store. Clones see the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Collections>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_post(&self, post: ScrapedPost) {
        self.inner.lock().await.posts.push(post);
    }

    /// Seeds a stored result directly, bypassing processing.
    pub async fn seed_result(&self, result: SentimentResult) {
        self.inner.lock().await.results.push(result);
    }

    pub async fn posts(&self) -> Vec<ScrapedPost> {
        self.inner.lock().await.posts.clone()
    }

    pub async fn results(&self) -> Vec<SentimentResult> {
        self.inner.lock().await.results.clone()
    }

    /// Makes every subsequent result write fail.
    pub async fn fail_result_inserts(&self, fail: bool) {
        self.inner.lock().await.fail_result_inserts = fail;
    }

    /// Makes every subsequent status update to `status` fail, including the
    /// one inside `complete_post`. `None` clears it.
    pub async fn fail_status_updates_to(&self, status: Option<PostStatus>) {
        self.inner.lock().await.fail_status = status;
    }

    /// Makes every operation fail, as if the database were unreachable.
    pub async fn set_offline(&self, offline: bool) {
        self.inner.lock().await.offline = offline;
    }
}

fn unavailable() -> DbError {
    DbError::Sqlx(sqlx::Error::PoolTimedOut)
}

impl DocumentStore for MemoryStore {
    async fn find_unprocessed_posts(&self, session_id: &str) -> Result<Vec<ScrapedPost>, DbError> {
        let data = self.inner.lock().await;
        if data.offline {
            return Err(unavailable());
        }
        Ok(data
            .posts
            .iter()
            .filter(|p| p.session_id == session_id && p.status == PostStatus::Unprocessed)
            .cloned()
            .collect())
    }

    async fn find_session_keyword(&self, session_id: &str) -> Result<Option<String>, DbError> {
        let data = self.inner.lock().await;
        if data.offline {
            return Err(unavailable());
        }
        Ok(data
            .posts
            .iter()
            .filter(|p| p.session_id == session_id)
            .find_map(|p| p.keyword.clone()))
    }

    async fn find_results(
        &self,
        session_id: &str,
        model: &str,
    ) -> Result<Vec<SentimentResult>, DbError> {
        let data = self.inner.lock().await;
        if data.offline {
            return Err(unavailable());
        }
        Ok(data
            .results
            .iter()
            .filter(|r| r.session_id == session_id && r.analysis.model == model)
            .cloned()
            .collect())
    }

    async fn complete_post(&self, result: &SentimentResult) -> Result<(), DbError> {
        let mut data = self.inner.lock().await;
        if data.offline || data.fail_result_inserts {
            return Err(unavailable());
        }
        if data.results.iter().any(|r| r.raw_id == result.raw_id) {
            return Err(DbError::InvalidRow(format!(
                "result for post {} already exists",
                result.raw_id
            )));
        }
        if data.fail_status == Some(PostStatus::Processed) {
            return Err(unavailable());
        }
        // Every check runs before the first write.
        let post = data
            .posts
            .iter_mut()
            .find(|p| p.id == result.raw_id)
            .ok_or(DbError::NotFound)?;
        post.status = PostStatus::Processed;
        data.results.push(result.clone());
        Ok(())
    }

    async fn set_post_status(&self, post_id: i64, status: PostStatus) -> Result<(), DbError> {
        let mut data = self.inner.lock().await;
        if data.offline || data.fail_status == Some(status) {
            return Err(unavailable());
        }
        let post = data
            .posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or(DbError::NotFound)?;
        post.status = status;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), DbError> {
        if self.inner.lock().await.offline {
            return Err(unavailable());
        }
        Ok(())
    }
}
