//! Shared HTTP plumbing for source clients.
//!
//! Centralizes status-code checks (429 rate limiting with `Retry-After`
//! parsing, non-success → [`SourceError::Api`]) and cancellation-aware
//! request helpers so the catalog and provider modules stay focused on
//! request construction and response mapping.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::error::SourceError;

/// Build the shared HTTP client used by the catalog and all providers.
///
/// # Panics
///
/// Panics if the underlying `reqwest::Client` fails to build.
#[must_use]
pub fn default_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent("reelmux/0.1")
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .expect("reqwest client should build")
}

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`SourceError::RateLimited`] with
///   `Retry-After` header parsing (falls back to 60 s if absent or
///   unparseable).
/// - **Non-success status** → [`SourceError::Api`] with status code and
///   response body.
pub async fn check_response(
    resp: reqwest::Response,
) -> Result<reqwest::Response, SourceError> {
    if resp.status() == 429 {
        let retry_after = parse_retry_after(&resp);
        return Err(SourceError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !resp.status().is_success() {
        return Err(SourceError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// GET `url` and decode the JSON body, racing every await against `cancel`.
///
/// The body is read as text and decoded separately so decode failures carry
/// serde's position information as [`SourceError::Parse`] instead of an
/// opaque transport error.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    cancel: &CancellationToken,
) -> Result<T, SourceError> {
    if cancel.is_cancelled() {
        return Err(SourceError::Cancelled);
    }
    let resp = tokio::select! {
        biased;
        () = cancel.cancelled() => return Err(SourceError::Cancelled),
        resp = client.get(url).send() => resp?,
    };
    decode_body(resp, cancel).await
}

/// POST `body` as JSON to `url` and decode the JSON response, racing every
/// await against `cancel`.
pub(crate) async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    body: &B,
    cancel: &CancellationToken,
) -> Result<T, SourceError> {
    if cancel.is_cancelled() {
        return Err(SourceError::Cancelled);
    }
    let resp = tokio::select! {
        biased;
        () = cancel.cancelled() => return Err(SourceError::Cancelled),
        resp = client.post(url).json(body).send() => resp?,
    };
    decode_body(resp, cancel).await
}

async fn decode_body<T: DeserializeOwned>(
    resp: reqwest::Response,
    cancel: &CancellationToken,
) -> Result<T, SourceError> {
    let resp = check_response(resp).await?;
    let text = tokio::select! {
        biased;
        () = cancel.cancelled() => return Err(SourceError::Cancelled),
        text = resp.text() => text?,
    };
    serde_json::from_str(&text).map_err(|e| SourceError::Parse(e.to_string()))
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}
