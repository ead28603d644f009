//! Minimal GitHub GraphQL client.
//!
//! Covers exactly what the query tooling needs from the remote side: who the
//! authenticated user is, and whether user, label, milestone and project names
//! exist in a repository.
//!
//! # Quick Start
//!
//! ```
//! use gh_api_rs::prelude::*;
//!
//! let repo: RepoRef = "cli/cli".parse().unwrap();
//! assert_eq!(repo.web_url(), "https://github.com/cli/cli");
//! ```

pub mod client;
pub mod error;
pub mod prelude;
pub mod queries;
pub mod repo;
mod retry;
