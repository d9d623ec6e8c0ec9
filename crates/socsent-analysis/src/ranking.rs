//! Cross-session sentiment ranking.

use serde::Serialize;

use socsent_core::ReportSettings;
use socsent_db::DocumentStore;

use crate::aggregate::{round4, session_keyword, ScoreTotals};
use crate::error::AnalysisError;

/// Averages for one session that met the post threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionAggregate {
    pub session_id: String,
    pub keyword: String,
    pub avg_negative_score: f64,
    pub avg_positive_score: f64,
    pub avg_neutral_score: f64,
    pub total_posts: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedSession {
    pub session_id: String,
    pub reason: String,
}

/// Either one session leads both extremes, or two sessions split them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RankingExtremes {
    Shared {
        mixed_sentiment_session: SessionAggregate,
    },
    Split {
        highest_avg_negative_session: SessionAggregate,
        highest_avg_positive_session: SessionAggregate,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionRanking {
    pub is_session_shared: bool,
    #[serde(flatten)]
    pub extremes: RankingExtremes,
    /// Qualifying sessions, most posts first.
    pub all_session_rankings: Vec<SessionAggregate>,
    pub skipped_sessions: Vec<SkippedSession>,
    pub summary: String,
}

/// Ranks sessions by their average sentiment.
///
/// Sessions with no results, or fewer than `min_posts` (defaulting to the
/// configured threshold), are reported in `skipped_sessions`. All sorts are
/// stable, so ties keep request order.
///
/// # Errors
///
/// Returns [`AnalysisError::NotFound`] if no session qualifies, or
/// [`AnalysisError::Store`] if a store query fails.
pub async fn rank_sessions<S: DocumentStore>(
    store: &S,
    settings: &ReportSettings,
    session_ids: &[String],
    min_posts: Option<usize>,
) -> Result<SessionRanking, AnalysisError> {
    let min_posts = min_posts.unwrap_or(settings.min_posts);
    let mut rankings = Vec::new();
    let mut skipped = Vec::new();

    for session_id in session_ids {
        let results = store
            .find_results(session_id, &settings.report_model)
            .await?;

        if results.is_empty() {
            skipped.push(SkippedSession {
                session_id: session_id.clone(),
                reason: "No posts found".to_string(),
            });
            continue;
        }
        if results.len() < min_posts {
            skipped.push(SkippedSession {
                session_id: session_id.clone(),
                reason: format!("Only {} posts", results.len()),
            });
            continue;
        }

        let totals = ScoreTotals::from_results(&results);
        rankings.push(SessionAggregate {
            session_id: session_id.clone(),
            keyword: session_keyword(store, session_id).await?,
            avg_negative_score: round4(totals.avg_negative()),
            avg_positive_score: round4(totals.avg_positive()),
            avg_neutral_score: round4(totals.avg_neutral()),
            total_posts: totals.total_posts,
        });
    }

    let (Some(most_negative), Some(most_positive)) = (
        top_by(&rankings, |s| s.avg_negative_score),
        top_by(&rankings, |s| s.avg_positive_score),
    ) else {
        return Err(AnalysisError::NotFound(
            "No valid session data found (posts <= threshold or missing)".to_string(),
        ));
    };
    let (most_negative, most_positive) = (most_negative.clone(), most_positive.clone());

    tracing::debug!(
        qualifying = rankings.len(),
        skipped = skipped.len(),
        "ranked sessions"
    );

    let mut by_posts = rankings;
    by_posts.sort_by(|a, b| b.total_posts.cmp(&a.total_posts));

    if most_negative.session_id == most_positive.session_id {
        Ok(SessionRanking {
            is_session_shared: true,
            summary: mixed_summary(&most_negative),
            extremes: RankingExtremes::Shared {
                mixed_sentiment_session: most_negative,
            },
            all_session_rankings: by_posts,
            skipped_sessions: skipped,
        })
    } else {
        Ok(SessionRanking {
            is_session_shared: false,
            summary: contrast_summary(&most_negative, &most_positive),
            extremes: RankingExtremes::Split {
                highest_avg_negative_session: most_negative,
                highest_avg_positive_session: most_positive,
            },
            all_session_rankings: by_posts,
            skipped_sessions: skipped,
        })
    }
}

/// First session with the highest `key`; earlier sessions win ties.
fn top_by(
    sessions: &[SessionAggregate],
    key: impl Fn(&SessionAggregate) -> f64,
) -> Option<&SessionAggregate> {
    let mut sorted: Vec<&SessionAggregate> = sessions.iter().collect();
    sorted.sort_by(|a, b| key(b).total_cmp(&key(a)));
    sorted.first().copied()
}

fn mixed_summary(session: &SessionAggregate) -> String {
    format!(
        "The session '{}' stands out by having both the highest average positive sentiment \
         ({:.4}) and the highest average negative sentiment ({:.4}) across {} posts. \
         This indicates that people expressed very mixed opinions in this session, \
         some posts were highly positive while others were strongly negative.",
        session.keyword,
        session.avg_positive_score,
        session.avg_negative_score,
        session.total_posts,
    )
}

fn contrast_summary(negative: &SessionAggregate, positive: &SessionAggregate) -> String {
    format!(
        "Among the provided sessions, session '{}' shows the highest average negative sentiment \
         with a score of {:.4} across {} posts. \
         This suggests that the content in this session may be more emotionally charged, \
         critical, or negative. \
         In contrast, session '{}' has the highest average positive sentiment score of \
         {:.4} over {} posts, indicating a more positive and constructive tone overall.",
        negative.keyword,
        negative.avg_negative_score,
        negative.total_posts,
        positive.keyword,
        positive.avg_positive_score,
        positive.total_posts,
    )
}

#[cfg(test)]
mod tests {
    use socsent_db::MemoryStore;

    use super::*;
    use crate::test_support::{result_with_scores, tweet};

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    async fn seed(store: &MemoryStore, session: &str, first_id: i64, scores: &[(f64, f64, f64)]) {
        for (offset, &(neg, pos, neu)) in (0_i64..).zip(scores) {
            store
                .seed_result(result_with_scores(first_id + offset, session, neg, pos, neu))
                .await;
        }
    }

    async fn keyword(store: &MemoryStore, id: i64, session: &str, keyword: &str) {
        let mut post = tweet(id, session, "x");
        post.keyword = Some(keyword.to_string());
        store.insert_post(post).await;
    }

    #[tokio::test]
    async fn split_extremes_with_contrasting_summary() {
        let store = MemoryStore::new();
        keyword(&store, 1, "neg", "tax hike").await;
        keyword(&store, 2, "pos", "new park").await;
        seed(&store, "neg", 100, &[(0.8, 0.1, 0.1); 3]).await;
        seed(&store, "pos", 200, &[(0.1, 0.8, 0.1); 4]).await;

        let ranking = rank_sessions(&store, &ReportSettings::default(), &ids(&["neg", "pos"]), None)
            .await
            .expect("ranking");

        assert!(!ranking.is_session_shared);
        let RankingExtremes::Split {
            highest_avg_negative_session,
            highest_avg_positive_session,
        } = &ranking.extremes
        else {
            panic!("expected split extremes");
        };
        assert_eq!(highest_avg_negative_session.session_id, "neg");
        assert_eq!(highest_avg_positive_session.session_id, "pos");
        assert!(ranking
            .summary
            .starts_with("Among the provided sessions, session 'tax hike' shows"));
        assert!(ranking.summary.contains("score of 0.8000 across 3 posts."));
        assert!(ranking.summary.contains(
            "critical, or negative. In contrast, session 'new park' has the highest"
        ));
        assert!(ranking.summary.contains("0.8000 over 4 posts"));

        let by_posts: Vec<&str> = ranking
            .all_session_rankings
            .iter()
            .map(|s| s.session_id.as_str())
            .collect();
        assert_eq!(by_posts, vec!["pos", "neg"]);
    }

    #[tokio::test]
    async fn same_session_leading_both_is_shared() {
        let store = MemoryStore::new();
        keyword(&store, 1, "mixed", "election").await;
        seed(&store, "mixed", 100, &[(0.9, 0.05, 0.05), (0.05, 0.9, 0.05), (0.5, 0.5, 0.0)]).await;
        seed(&store, "calm", 200, &[(0.1, 0.1, 0.8); 3]).await;

        let ranking = rank_sessions(
            &store,
            &ReportSettings::default(),
            &ids(&["calm", "mixed"]),
            None,
        )
        .await
        .expect("ranking");

        assert!(ranking.is_session_shared);
        let RankingExtremes::Shared {
            mixed_sentiment_session,
        } = &ranking.extremes
        else {
            panic!("expected shared extremes");
        };
        assert_eq!(mixed_sentiment_session.session_id, "mixed");
        assert_eq!(mixed_sentiment_session.keyword, "election");
        assert!(ranking
            .summary
            .starts_with("The session 'election' stands out"));
        assert!(ranking.summary.contains("across 3 posts."));
        assert_eq!(ranking.all_session_rankings.len(), 2);
    }

    #[tokio::test]
    async fn single_qualifying_session_is_shared() {
        let store = MemoryStore::new();
        seed(&store, "only", 1, &[(0.3, 0.3, 0.4); 3]).await;

        let ranking = rank_sessions(&store, &ReportSettings::default(), &ids(&["only"]), None)
            .await
            .expect("ranking");

        assert!(ranking.is_session_shared);
        assert!(ranking.summary.starts_with("The session 'Unknown'"));
    }

    #[tokio::test]
    async fn threshold_and_missing_sessions_are_skipped_with_reasons() {
        let store = MemoryStore::new();
        seed(&store, "small", 1, &[(0.5, 0.5, 0.0); 2]).await;
        seed(&store, "big", 10, &[(0.5, 0.5, 0.0); 3]).await;

        let ranking = rank_sessions(
            &store,
            &ReportSettings::default(),
            &ids(&["small", "ghost", "big"]),
            None,
        )
        .await
        .expect("ranking");

        assert_eq!(
            ranking.skipped_sessions,
            vec![
                SkippedSession {
                    session_id: "small".to_string(),
                    reason: "Only 2 posts".to_string(),
                },
                SkippedSession {
                    session_id: "ghost".to_string(),
                    reason: "No posts found".to_string(),
                },
            ]
        );
        assert_eq!(ranking.all_session_rankings.len(), 1);
        assert_eq!(ranking.all_session_rankings[0].session_id, "big");
    }

    #[tokio::test]
    async fn explicit_min_posts_overrides_default() {
        let store = MemoryStore::new();
        seed(&store, "one", 1, &[(0.5, 0.5, 0.0)]).await;

        let ranking = rank_sessions(&store, &ReportSettings::default(), &ids(&["one"]), Some(1))
            .await
            .expect("ranking");
        assert!(ranking.skipped_sessions.is_empty());
        assert_eq!(ranking.all_session_rankings[0].total_posts, 1);
    }

    #[tokio::test]
    async fn nothing_qualifying_is_not_found() {
        let store = MemoryStore::new();
        seed(&store, "tiny", 1, &[(0.5, 0.5, 0.0)]).await;

        let err = rank_sessions(&store, &ReportSettings::default(), &ids(&["tiny", "none"]), None)
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "No valid session data found (posts <= threshold or missing)"
        );
    }

    #[tokio::test]
    async fn averages_are_rounded_to_four_decimals() {
        let store = MemoryStore::new();
        seed(
            &store,
            "s",
            1,
            &[(1.0, 0.0, 0.0), (0.0, 1.0, 0.0), (0.0, 0.0, 1.0)],
        )
        .await;

        let ranking = rank_sessions(&store, &ReportSettings::default(), &ids(&["s"]), None)
            .await
            .expect("ranking");

        let session = &ranking.all_session_rankings[0];
        assert!((session.avg_negative_score - 0.3333).abs() < 1e-12);
        assert!((session.avg_positive_score - 0.3333).abs() < 1e-12);
        assert!((session.avg_neutral_score - 0.3333).abs() < 1e-12);
    }

    #[tokio::test]
    async fn ties_keep_request_order() {
        let store = MemoryStore::new();
        seed(&store, "first", 1, &[(0.4, 0.4, 0.2); 3]).await;
        seed(&store, "second", 10, &[(0.4, 0.4, 0.2); 3]).await;

        let ranking = rank_sessions(
            &store,
            &ReportSettings::default(),
            &ids(&["first", "second"]),
            None,
        )
        .await
        .expect("ranking");

        assert!(ranking.is_session_shared);
        let RankingExtremes::Shared {
            mixed_sentiment_session,
        } = &ranking.extremes
        else {
            panic!("expected shared extremes");
        };
        assert_eq!(mixed_sentiment_session.session_id, "first");
        let order: Vec<&str> = ranking
            .all_session_rankings
            .iter()
            .map(|s| s.session_id.as_str())
            .collect();
        assert_eq!(order, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn serializes_flattened_extremes() {
        let store = MemoryStore::new();
        seed(&store, "a", 1, &[(0.9, 0.1, 0.0); 3]).await;
        seed(&store, "b", 10, &[(0.1, 0.9, 0.0); 3]).await;

        let ranking = rank_sessions(&store, &ReportSettings::default(), &ids(&["a", "b"]), None)
            .await
            .expect("ranking");
        let json = serde_json::to_value(&ranking).expect("serialize");

        assert_eq!(json["is_session_shared"], false);
        assert_eq!(json["highest_avg_negative_session"]["session_id"], "a");
        assert_eq!(json["highest_avg_positive_session"]["session_id"], "b");
        assert!(json.get("mixed_sentiment_session").is_none());
        assert!(json.get("extremes").is_none());
        assert_eq!(json["skipped_sessions"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let store = MemoryStore::new();
        store.set_offline(true).await;
        let err = rank_sessions(&store, &ReportSettings::default(), &ids(&["a"]), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Store(_)));
    }
}
