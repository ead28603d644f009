//! Listing filters and their encoding into a search `q` parameter.

use std::fmt;

use serde::Serialize;

use crate::error::QueryResult;
use crate::quote::quote_value;
use crate::state_clause::query_has_state_clause;
use crate::url_query::merge_query;

/// The kind of item a listing shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    #[default]
    Issue,
    #[serde(rename = "pr")]
    PullRequest,
}

impl Entity {
    /// The value used in the `is:` qualifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Issue => "issue",
            Entity::PullRequest => "pr",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured listing filter.
///
/// Encoding is a pure function of these fields. `state` is one of `open`,
/// `closed`, `merged`, or empty; `all` is accepted as a synonym for empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub entity: Entity,
    pub state: String,
    pub assignee: Option<String>,
    pub author: Option<String>,
    pub mention: Option<String>,
    pub labels: Vec<String>,
    pub milestone: Option<String>,
    pub base_branch: Option<String>,
    /// `draft:true` / `draft:false`; only meaningful for pull requests.
    pub draft: Option<bool>,
    /// Raw search text appended after the structured qualifiers.
    pub search: Option<String>,
}

impl FilterOptions {
    /// Creates an empty filter for `entity`.
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            ..Self::default()
        }
    }

    /// Returns the search query these options describe, unencoded.
    ///
    /// Terms come in a fixed order: entity, state, assignee, author, mentions,
    /// labels, milestone, base, draft, then the raw search text. The state
    /// term is dropped when the raw search text already states one.
    pub fn search_query(&self) -> String {
        let mut terms: Vec<String> = vec![format!("is:{}", self.entity)];

        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let state = self.state.trim();
        if !state.is_empty() && state != "all" && !search.is_some_and(query_has_state_clause) {
            terms.push(format!("is:{}", state));
        }

        push_qualifier(&mut terms, "assignee", self.assignee.as_deref());
        push_qualifier(&mut terms, "author", self.author.as_deref());
        push_qualifier(&mut terms, "mentions", self.mention.as_deref());
        for label in &self.labels {
            push_qualifier(&mut terms, "label", Some(label));
        }
        push_qualifier(&mut terms, "milestone", self.milestone.as_deref());
        push_qualifier(&mut terms, "base", self.base_branch.as_deref());
        if let Some(draft) = self.draft {
            terms.push(format!("draft:{}", draft));
        }
        if let Some(search) = search {
            terms.push(search.to_string());
        }

        terms.join(" ")
    }
}

fn push_qualifier(terms: &mut Vec<String>, qualifier: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        terms.push(format!("{}:{}", qualifier, quote_value(value)));
    }
}

/// Encodes `options` as the `q` parameter of `list_url`.
///
/// Other parameters already on `list_url` are kept; an existing `q` is
/// replaced, never merged with the new terms.
///
/// # Errors
///
/// Returns [`QueryError::MalformedUrl`](crate::QueryError::MalformedUrl) if
/// `list_url` does not parse.
///
/// # Example
///
/// ```
/// use gh_query_rs::{list_url_with_query, Entity, FilterOptions};
///
/// let options = FilterOptions {
///     state: "open".to_string(),
///     ..FilterOptions::new(Entity::Issue)
/// };
/// let url = list_url_with_query("https://example.com/path?a=b", &options).unwrap();
/// assert_eq!(url, "https://example.com/path?a=b&q=is%3Aissue+is%3Aopen");
/// ```
pub fn list_url_with_query(list_url: &str, options: &FilterOptions) -> QueryResult<String> {
    let query = options.search_query();
    merge_query(list_url, |params| params.set("q", query))
}
