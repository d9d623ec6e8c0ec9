//! Fixtures shared by the unit tests of this crate.

use socsent_core::{
    Platform, PostStatus, ScrapedPost, SentimentAnalysis, SentimentResult, SentimentScores,
};
use socsent_inference::InferenceClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub(crate) const MODEL: &str = "sentiment-v3";

pub(crate) fn tweet(id: i64, session_id: &str, text: &str) -> ScrapedPost {
    ScrapedPost {
        id,
        session_id: session_id.to_string(),
        platform: Platform::Twitter,
        text: Some(text.to_string()),
        metadata: None,
        content: None,
        keyword: None,
        datetime: None,
        status: PostStatus::Unprocessed,
    }
}

pub(crate) fn result_with_scores(
    raw_id: i64,
    session_id: &str,
    negative: f64,
    positive: f64,
    neutral: f64,
) -> SentimentResult {
    SentimentResult {
        raw_id,
        session_id: session_id.to_string(),
        platform: Platform::Twitter,
        text: format!("post {raw_id}"),
        hashtags: vec![],
        analysis: SentimentAnalysis::new(
            MODEL,
            SentimentScores::from([
                ("Negative", negative),
                ("Positive", positive),
                ("Neutral", neutral),
            ]),
        ),
        datetime: None,
        status: PostStatus::Processed,
    }
}

/// Starts a mock inference service answering every request with `status`.
pub(crate) async fn inference_replying(status: u16) -> (MockServer, InferenceClient) {
    let server = MockServer::start().await;
    let template = if status == 200 {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "model": MODEL,
            "scores": { "Negative": 0.1, "Positive": 0.7, "Neutral": 0.2 }
        }))
    } else {
        ResponseTemplate::new(status).set_body_string("inference unavailable")
    };
    Mock::given(method("POST"))
        .and(path("/infer"))
        .respond_with(template)
        .mount(&server)
        .await;

    let client = InferenceClient::new(&format!("{}/infer", server.uri()), 5).expect("client");
    (server, client)
}
