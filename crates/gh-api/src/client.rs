//! HTTP client wrapper for the GitHub GraphQL API.

use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{ApiError, Error, Result};
use crate::repo::DEFAULT_HOST;
use crate::retry::{execute_with_retry, RetryConfig};

/// GraphQL endpoint for github.com.
const GITHUB_COM_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent sent with every request.
const USER_AGENT: &str = concat!("ghq/", env!("CARGO_PKG_VERSION"));

/// Client for the GitHub GraphQL API.
///
/// One client serves every host; the endpoint is picked per request from the
/// host name unless an explicit GraphQL URL was configured on the builder.
#[derive(Clone)]
pub struct GitHubClient {
    token: String,
    http_client: reqwest::Client,
    graphql_url: Option<String>,
    retry: RetryConfig,
}

/// Builder for [`GitHubClient`].
#[derive(Debug, Clone)]
pub struct GitHubClientBuilder {
    token: String,
    graphql_url: Option<String>,
    retry: RetryConfig,
    request_timeout: Duration,
}

impl GitHubClientBuilder {
    /// Creates a builder with default retry and timeout settings.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            graphql_url: None,
            retry: RetryConfig::default(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Sends every request to this URL regardless of host.
    pub fn graphql_url(mut self, url: impl Into<String>) -> Self {
        self.graphql_url = Some(url.into());
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.retry.max_retries = max_retries;
        self
    }

    pub fn initial_backoff(mut self, backoff: Duration) -> Self {
        self.retry.initial_backoff = backoff;
        self
    }

    pub fn max_backoff(mut self, backoff: Duration) -> Self {
        self.retry.max_backoff = backoff;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn build(self) -> Result<GitHubClient> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.request_timeout)
            .build()?;

        Ok(GitHubClient {
            token: self.token,
            http_client,
            graphql_url: self.graphql_url,
            retry: self.retry,
        })
    }
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlErrorEntry>,
}

#[derive(Deserialize)]
struct GraphQlErrorEntry {
    message: String,
}

impl GitHubClient {
    /// Creates a client with default settings.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        GitHubClientBuilder::new(token).build()
    }

    /// Returns a builder for customizing the client.
    pub fn builder(token: impl Into<String>) -> GitHubClientBuilder {
        GitHubClientBuilder::new(token)
    }

    /// Creates a client that sends every request to `graphql_url`.
    pub fn with_graphql_url(token: impl Into<String>, graphql_url: impl Into<String>) -> Result<Self> {
        GitHubClientBuilder::new(token).graphql_url(graphql_url).build()
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn max_retries(&self) -> u32 {
        self.retry.max_retries
    }

    pub fn initial_backoff(&self) -> Duration {
        self.retry.initial_backoff
    }

    pub fn max_backoff(&self) -> Duration {
        self.retry.max_backoff
    }

    /// Calculates the retry delay for an attempt.
    pub fn calculate_backoff(&self, attempt: u32, retry_after: Option<u64>) -> Duration {
        self.retry.calculate_backoff(attempt, retry_after)
    }

    /// Returns the GraphQL endpoint for a host.
    ///
    /// `github.com` uses `api.github.com`; Enterprise hosts serve the API under
    /// `/api/graphql`.
    pub fn graphql_endpoint(&self, host: &str) -> String {
        if let Some(url) = &self.graphql_url {
            return url.clone();
        }
        let host = host.to_ascii_lowercase();
        if host == DEFAULT_HOST || host == format!("api.{}", DEFAULT_HOST) {
            GITHUB_COM_GRAPHQL_URL.to_string()
        } else {
            format!("https://{}/api/graphql", host)
        }
    }

    /// Runs a GraphQL query against `host` and returns its `data` member.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-success statuses (429 is retried first),
    /// a non-empty `errors` array, or a response without `data`.
    pub async fn graphql<T: DeserializeOwned>(
        &self,
        host: &str,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let url = self.graphql_endpoint(host);
        let body = serde_json::json!({ "query": query, "variables": variables });
        tracing::debug!(%url, "graphql request");

        let response: GraphQlResponse<T> = execute_with_retry(&self.retry, || {
            let request = self
                .http_client
                .post(&url)
                .bearer_auth(&self.token)
                .json(&body);
            async move { request.send().await.map_err(Error::from) }
        })
        .await?;

        if !response.errors.is_empty() {
            return Err(ApiError::GraphQl {
                messages: response.errors.into_iter().map(|e| e.message).collect(),
            }
            .into());
        }

        response.data.ok_or_else(|| {
            ApiError::GraphQl {
                messages: vec!["response contained no data".to_string()],
            }
            .into()
        })
    }
}

impl fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubClient")
            .field("token", &"[REDACTED]")
            .field("graphql_url", &self.graphql_url)
            .field("retry", &self.retry)
            .finish()
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
