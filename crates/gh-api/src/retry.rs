//! Rate-limit retries for GraphQL requests.
//!
//! Only HTTP 429 is retried. Every other non-success status is turned into an
//! [`ApiError`] on the first attempt.

use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::error::{ApiError, Error, Result};

pub(crate) const DEFAULT_INITIAL_BACKOFF_SECS: u64 = 1;
pub(crate) const DEFAULT_MAX_BACKOFF_SECS: u64 = 30;
pub(crate) const DEFAULT_MAX_RETRIES: u32 = 3;

#[derive(Clone, Debug)]
pub(crate) struct RetryConfig {
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff: Duration::from_secs(DEFAULT_INITIAL_BACKOFF_SECS),
            max_backoff: Duration::from_secs(DEFAULT_MAX_BACKOFF_SECS),
        }
    }
}

impl RetryConfig {
    /// Delay before retry number `attempt + 1`.
    ///
    /// A server-provided `Retry-After` wins over `initial * 2^attempt`; both
    /// are capped at `max_backoff`.
    pub fn calculate_backoff(&self, attempt: u32, retry_after: Option<u64>) -> Duration {
        let wanted = match retry_after {
            Some(secs) => Duration::from_secs(secs),
            None => {
                let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
                self.initial_backoff.saturating_mul(factor)
            }
        };
        wanted.min(self.max_backoff)
    }
}

fn retry_after_secs(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

/// Maps a failed status and its body to an [`ApiError`].
fn classify_failure(
    status: StatusCode,
    retry_after: Option<u64>,
    path: &str,
    body: String,
) -> ApiError {
    let body_or = |fallback: &str| {
        if body.trim().is_empty() {
            fallback.to_string()
        } else {
            body.clone()
        }
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Auth {
            message: body_or("Authentication failed"),
        },
        StatusCode::NOT_FOUND => ApiError::NotFound {
            resource: "endpoint".to_string(),
            name: path.to_string(),
        },
        StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimit { retry_after },
        StatusCode::BAD_REQUEST => ApiError::Validation {
            message: body_or("Bad request"),
        },
        other => ApiError::Http {
            status: other.as_u16(),
            message: body_or(other.canonical_reason().unwrap_or("Unknown error")),
        },
    }
}

/// Sends requests built by `send` until one is not rate limited or the
/// retry budget is spent, then decodes the body as `T`.
pub(crate) async fn execute_with_retry<T, F, Fut>(config: &RetryConfig, mut send: F) -> Result<T>
where
    T: DeserializeOwned,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<reqwest::Response>>,
{
    let mut attempt = 0;
    loop {
        let response = send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let retry_after = retry_after_secs(&response);
        if status == StatusCode::TOO_MANY_REQUESTS && attempt < config.max_retries {
            let backoff = config.calculate_backoff(attempt, retry_after);
            tracing::debug!(attempt, ?backoff, "rate limited, backing off");
            sleep(backoff).await;
            attempt += 1;
            continue;
        }

        let path = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Api(classify_failure(status, retry_after, &path, body)));
    }
}
