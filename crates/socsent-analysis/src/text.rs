//! Text normalization applied before inference, plus payload extraction.

use std::sync::LazyLock;

use regex::Regex;

use socsent_core::{Platform, ScrapedPost};

/// Cleaned text keeps at most this many words.
pub const MAX_CLEAN_WORDS: usize = 200;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"http\S+").expect("valid url regex"));
static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\w+").expect("valid mention regex"));
static HASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\w+").expect("valid hashtag regex"));

/// Normalizes post text for the sentiment model.
///
/// Lowercases, replaces URLs with `http` and mentions with `@user`, collapses
/// whitespace, and truncates to [`MAX_CLEAN_WORDS`] words. Applying it twice
/// gives the same result as applying it once.
#[must_use]
pub fn clean_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let without_urls = URL_RE.replace_all(&lowered, "http");
    let without_mentions = MENTION_RE.replace_all(&without_urls, "@user");

    without_mentions
        .split_whitespace()
        .take(MAX_CLEAN_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns every `#tag` in `text`, in order of appearance, `#` included.
#[must_use]
pub fn extract_hashtags(text: &str) -> Vec<String> {
    HASHTAG_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Picks the payload field that carries the post text for its platform.
///
/// Returns `None` for platforms without a mapping and for missing or empty
/// payloads; such posts are skipped, not failed.
#[must_use]
pub fn extract_text_by_platform(post: &ScrapedPost) -> Option<&str> {
    let payload = match post.platform {
        Platform::Twitter => post.text.as_deref(),
        Platform::Youtube => post.metadata.as_deref(),
        Platform::Reddit => post.content.as_deref(),
        Platform::Other(_) => None,
    };
    payload.filter(|text| !text.is_empty())
}
