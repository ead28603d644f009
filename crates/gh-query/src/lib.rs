//! Search-filter query encoding for GitHub issue and pull request listings.
//!
//! - [`list_url_with_query`] turns a [`FilterOptions`] into the `q` parameter
//!   of a listing URL.
//! - [`query_has_state_clause`] tells whether a free-text query already
//!   expresses an open/closed/merged state.
//! - [`with_pr_and_issue_query_params`] fills the query string of a creation
//!   form from an [`IssueMetadataState`].
//! - [`MeReplacer`] turns `@me` into the authenticated user's login with one
//!   remote call per instance.
//!
//! # Example
//!
//! ```
//! use gh_query_rs::{list_url_with_query, query_has_state_clause, Entity, FilterOptions};
//!
//! let options = FilterOptions {
//!     state: "open".to_string(),
//!     labels: vec!["help wanted".to_string()],
//!     ..FilterOptions::new(Entity::Issue)
//! };
//! let url = list_url_with_query("https://github.com/cli/cli/issues", &options).unwrap();
//! assert_eq!(
//!     url,
//!     "https://github.com/cli/cli/issues?q=is%3Aissue+is%3Aopen+label%3A%22help+wanted%22"
//! );
//!
//! assert!(query_has_state_clause("author:monalisa is:closed"));
//! ```

mod error;
mod filter;
mod lookup;
mod me;
mod metadata;
mod quote;
mod state_clause;
mod url_query;

pub use error::{QueryError, QueryResult};
pub use filter::{list_url_with_query, Entity, FilterOptions};
pub use lookup::{MetadataKind, MetadataLookup, ViewerLookup};
pub use me::{MeReplacer, ME_TOKEN};
pub use metadata::{with_pr_and_issue_query_params, IssueMetadataState};
pub use state_clause::query_has_state_clause;
