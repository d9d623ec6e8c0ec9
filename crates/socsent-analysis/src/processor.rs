//! Session processing: runs unprocessed posts through inference and stores results.

use serde::Serialize;

use socsent_core::{PostStatus, ReportSettings, ScrapedPost, SentimentResult};
use socsent_db::DocumentStore;
use socsent_inference::InferenceClient;

use crate::error::AnalysisError;
use crate::text::{clean_text, extract_hashtags, extract_text_by_platform};

/// Counts reported back after processing a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessOutcome {
    pub session_id: String,
    pub posts_processed: usize,
    pub total_attempted: usize,
}

impl ProcessOutcome {
    #[must_use]
    pub fn message(&self) -> String {
        format!("Session {} processed.", self.session_id)
    }
}

/// Processes every unprocessed post of a session.
///
/// Posts are handled one at a time. A post without usable text is skipped and
/// keeps its status. A post whose inference or storage fails is marked
/// [`PostStatus::Failed`] and the batch continues; only successfully stored
/// posts count toward `posts_processed`.
///
/// # Errors
///
/// Returns [`AnalysisError::NotFound`] if the session has no unprocessed
/// posts, or [`AnalysisError::Store`] if they cannot be listed.
pub async fn process_session<S: DocumentStore>(
    store: &S,
    inference: &InferenceClient,
    settings: &ReportSettings,
    session_id: &str,
) -> Result<ProcessOutcome, AnalysisError> {
    let posts = store.find_unprocessed_posts(session_id).await?;
    if posts.is_empty() {
        return Err(AnalysisError::NotFound(
            "No unprocessed posts found for this session.".to_string(),
        ));
    }

    tracing::info!(session_id, posts = posts.len(), "processing session");

    let mut processed = 0;
    for post in &posts {
        let Some(text) = extract_text_by_platform(post) else {
            tracing::warn!(
                post_id = post.id,
                platform = %post.platform,
                "no valid text found in post, skipping"
            );
            continue;
        };

        match process_post(store, inference, &settings.default_model, post, text).await {
            Ok(()) => processed += 1,
            Err(e) => {
                tracing::error!(post_id = post.id, error = %e, "error processing post");
                if let Err(mark_err) = store.set_post_status(post.id, PostStatus::Failed).await {
                    tracing::error!(
                        post_id = post.id,
                        error = %mark_err,
                        "failed to mark post as failed"
                    );
                }
            }
        }
    }

    tracing::info!(
        session_id,
        processed,
        attempted = posts.len(),
        "session processing finished"
    );

    Ok(ProcessOutcome {
        session_id: session_id.to_string(),
        posts_processed: processed,
        total_attempted: posts.len(),
    })
}

async fn process_post<S: DocumentStore>(
    store: &S,
    inference: &InferenceClient,
    model: &str,
    post: &ScrapedPost,
    text: &str,
) -> Result<(), AnalysisError> {
    let hashtags = extract_hashtags(text);
    let cleaned = clean_text(text);
    let analysis = inference.analyze_scores(&cleaned, model).await?;

    let result = SentimentResult {
        raw_id: post.id,
        session_id: post.session_id.clone(),
        platform: post.platform.clone(),
        text: text.to_string(),
        hashtags,
        analysis,
        datetime: post.datetime,
        status: PostStatus::Processed,
    };

    store.complete_post(&result).await?;
    Ok(())
}
