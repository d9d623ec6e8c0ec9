use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::api::ApiError;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Decoded token payload, stored as a request extension once verified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(pub Map<String, Value>);

impl Claims {
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.0.get("sub").and_then(Value::as_str)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing authorization header")]
    Missing,
    #[error("Malformed token")]
    Malformed,
    #[error("Token expired")]
    Expired,
    #[error("Invalid token signature")]
    InvalidSignature,
    #[error("Token decode error: {0}")]
    Decode(String),
}

/// Verifies HS256 tokens against the shared secret.
#[derive(Clone)]
pub struct TokenValidator {
    key: Arc<DecodingKey>,
    validation: Arc<Validation>,
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenValidator")
            .field("key", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl TokenValidator {
    /// Builds a validator from the base64-encoded secret.
    ///
    /// Missing `=` padding is restored before decoding, so secrets copied
    /// without their trailing padding still work.
    pub fn from_base64_secret(secret: &str) -> anyhow::Result<Self> {
        let key_bytes = decode_secret(secret)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            key: Arc::new(DecodingKey::from_secret(&key_bytes)),
            validation: Arc::new(validation),
        })
    }

    /// Verifies `token` and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] naming why the token was rejected.
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        if token.split('.').count() != 3 {
            return Err(AuthError::Malformed);
        }

        jsonwebtoken::decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::Decode(e.to_string()),
            })
    }
}

fn decode_secret(secret: &str) -> anyhow::Result<Vec<u8>> {
    let mut padded = secret.trim().to_string();
    let missing = padded.len() % 4;
    if missing != 0 {
        padded.push_str(&"=".repeat(4 - missing));
    }
    STANDARD
        .decode(padded.as_bytes())
        .map_err(|e| anyhow::anyhow!("SOCSENT_JWT_SECRET is not valid base64: {e}"))
}

#[derive(Debug, Clone)]
struct RateLimitWindow {
    started_at: Instant,
    count: usize,
}

/// Sliding fixed-window limiter for simple API protection.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    max_requests: usize,
    window: Duration,
    state: Arc<Mutex<RateLimitWindow>>,
}

impl RateLimitState {
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            state: Arc::new(Mutex::new(RateLimitWindow {
                started_at: Instant::now(),
                count: 0,
            })),
        }
    }

    #[must_use]
    pub fn per_minute(max_requests: usize) -> Self {
        Self::new(max_requests, Duration::from_secs(60))
    }
}

fn request_id_of(req: &Request) -> String {
    req.extensions()
        .get::<RequestId>()
        .map_or_else(String::new, |id| id.0.clone())
}

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Middleware rejecting requests without a valid token.
///
/// Runs before any body extraction. On success the [`Claims`] are inserted
/// into request extensions.
pub async fn require_token(
    State(validator): State<TokenValidator>,
    mut req: Request,
    next: Next,
) -> Response {
    let outcome = extract_token(req.headers().get(AUTHORIZATION))
        .ok_or(AuthError::Missing)
        .and_then(|token| validator.validate(token));

    match outcome {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(e) => {
            tracing::warn!(reason = %e, path = %req.uri().path(), "rejected unauthenticated request");
            ApiError::new(request_id_of(&req), "unauthorized", e.to_string()).into_response()
        }
    }
}

/// Middleware enforcing a fixed request-per-window limit.
pub async fn enforce_rate_limit(
    State(rate_limit): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    let mut window = rate_limit.state.lock().await;
    let elapsed = window.started_at.elapsed();

    if elapsed >= rate_limit.window {
        window.started_at = Instant::now();
        window.count = 0;
    }

    if window.count >= rate_limit.max_requests {
        drop(window);
        return ApiError::new(request_id_of(&req), "rate_limited", "rate limit exceeded")
            .into_response();
    }

    window.count += 1;
    drop(window);

    next.run(req).await
}

/// Accepts `Bearer <token>` (scheme case-insensitive) or the bare token.
fn extract_token(value: Option<&HeaderValue>) -> Option<&str> {
    let raw = value.and_then(|v| v.to_str().ok())?.trim();
    let token = match raw.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ => raw,
    };
    (!token.is_empty()).then_some(token)
}
