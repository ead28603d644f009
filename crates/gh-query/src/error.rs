//! Error types for query encoding and name resolution.

use thiserror::Error;

/// A specialized Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors that can occur while building listing or form URLs.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The base URL could not be parsed.
    #[error("invalid URL '{url}': {source}")]
    MalformedUrl {
        /// The rejected input.
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A remote identity or name lookup failed.
    #[error("failed resolving {what}: {source}")]
    Resolution {
        /// What was being resolved, e.g. "`@me` to your user handle".
        what: String,
        #[source]
        source: gh_api_rs::error::Error,
    },

    /// Name lookups were requested without a repository to scope them.
    #[error("a repository is required to resolve metadata names")]
    MissingRepository,
}

impl QueryError {
    /// Creates a malformed URL error.
    pub fn malformed_url(url: impl Into<String>, source: url::ParseError) -> Self {
        QueryError::MalformedUrl {
            url: url.into(),
            source,
        }
    }

    /// Creates a resolution error.
    pub fn resolution(what: impl Into<String>, source: gh_api_rs::error::Error) -> Self {
        QueryError::Resolution {
            what: what.into(),
            source,
        }
    }
}
