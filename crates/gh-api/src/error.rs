//! Error types for the GitHub API client.

/// Failures reported by the GitHub API itself, as opposed to transport
/// failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// A non-success status with no more specific meaning.
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// 401 or 403: bad or missing token, or insufficient scopes.
    #[error("Auth error: {message}")]
    Auth { message: String },

    /// 429 after the retry budget ran out.
    #[error("Rate limited{}", .retry_after.map(|s| format!(", retry after {} seconds", s)).unwrap_or_default())]
    RateLimit { retry_after: Option<u64> },

    /// A named object does not exist, or the endpoint answered 404.
    #[error("{resource} not found: {name}")]
    NotFound { resource: String, name: String },

    /// 400: the request itself was rejected.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The response carried a GraphQL `errors` array.
    #[error("GraphQL error: {}", .messages.join("; "))]
    GraphQl { messages: Vec<String> },
}

impl ApiError {
    /// Exit status a CLI should use for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ApiError::RateLimit { .. } => 4,
            _ => 2,
        }
    }
}

/// Top-level error type for the client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Api(#[from] ApiError),

    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the JSON we expected.
    #[error("invalid response body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid repository reference '{0}': expected [HOST/]OWNER/REPO")]
    InvalidRepo(String),
}

impl Error {
    /// Exit status a CLI should use for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Api(api) => api.exit_code(),
            Error::Http(_) => 3,
            Error::Json(_) | Error::InvalidRepo(_) => 2,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let cases = [
            (
                ApiError::Http {
                    status: 503,
                    message: "Service Unavailable".to_string(),
                },
                "HTTP error 503: Service Unavailable",
            ),
            (
                ApiError::RateLimit {
                    retry_after: Some(60),
                },
                "Rate limited, retry after 60 seconds",
            ),
            (ApiError::RateLimit { retry_after: None }, "Rate limited"),
            (
                ApiError::NotFound {
                    resource: "label".to_string(),
                    name: "help wanted".to_string(),
                },
                "label not found: help wanted",
            ),
            (
                ApiError::GraphQl {
                    messages: vec!["first".to_string(), "second".to_string()],
                },
                "GraphQL error: first; second",
            ),
        ];
        for (error, expected) in cases {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ApiError::RateLimit { retry_after: None }.exit_code(), 4);
        assert_eq!(
            ApiError::Validation {
                message: "bad".to_string()
            }
            .exit_code(),
            2
        );
        assert_eq!(Error::InvalidRepo("x".to_string()).exit_code(), 2);
    }

    #[test]
    fn test_wrapped_api_error_keeps_message() {
        let error: Error = ApiError::Auth {
            message: "Bad credentials".to_string(),
        }
        .into();
        assert_eq!(error.to_string(), "Auth error: Bad credentials");
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn test_invalid_repo_display() {
        let error = Error::InvalidRepo("nope".to_string());
        assert_eq!(
            error.to_string(),
            "invalid repository reference 'nope': expected [HOST/]OWNER/REPO"
        );
    }
}
