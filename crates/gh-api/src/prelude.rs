//! Prelude module for convenient imports.
//!
//! ```
//! use gh_api_rs::prelude::*;
//!
//! // GitHubClient, GitHubClientBuilder (API client)
//! // Error, ApiError, Result (error handling)
//! // RepoRef (repository addressing)
//! ```

pub use crate::client::{GitHubClient, GitHubClientBuilder};
pub use crate::error::{ApiError, Error, Result};
pub use crate::repo::{RepoRef, DEFAULT_HOST};
