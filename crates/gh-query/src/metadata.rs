//! Query parameters for issue and pull request creation forms.

use gh_api_rs::repo::RepoRef;

use crate::error::{QueryError, QueryResult};
use crate::lookup::{MetadataKind, MetadataLookup};
use crate::url_query::UrlWithQuery;

/// Field values collected for a creation or edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueMetadataState {
    pub title: String,
    pub body: String,
    pub base_branch: String,
    pub assignees: Vec<String>,
    pub labels: Vec<String>,
    pub reviewers: Vec<String>,
    pub milestones: Vec<String>,
    pub projects: Vec<String>,
}

impl IssueMetadataState {
    /// Returns true if any field needs a remote name lookup.
    pub fn has_metadata(&self) -> bool {
        !self.assignees.is_empty()
            || !self.labels.is_empty()
            || !self.reviewers.is_empty()
            || !self.milestones.is_empty()
            || !self.projects.is_empty()
    }
}

/// Adds the fields of `state` to the query string of `base_url`.
///
/// `body` is always present, even when empty, so the web form does not
/// substitute a template. `title` and `base` are added when set.
///
/// Assignees, reviewers, labels, projects and the first milestone need
/// `lookup`; without it they are left out and no remote call is made.
/// Parameters are emitted with keys in sorted order.
///
/// # Errors
///
/// - [`QueryError::MalformedUrl`] if `base_url` does not parse.
/// - [`QueryError::MissingRepository`] if names must be resolved but `repo`
///   is `None`.
/// - [`QueryError::Resolution`] if any name lookup fails. Nothing is
///   returned in that case.
pub async fn with_pr_and_issue_query_params(
    lookup: Option<&dyn MetadataLookup>,
    repo: Option<&RepoRef>,
    base_url: &str,
    state: &IssueMetadataState,
) -> QueryResult<String> {
    let mut url = UrlWithQuery::parse(base_url)?;

    let params = url.params_mut();
    if !state.title.is_empty() {
        params.set("title", state.title.as_str());
    }
    params.set("body", state.body.as_str());
    if !state.base_branch.is_empty() {
        params.set("base", state.base_branch.as_str());
    }

    if let Some(lookup) = lookup.filter(|_| state.has_metadata()) {
        let repo = repo.ok_or(QueryError::MissingRepository)?;

        let lists = [
            ("assignees", MetadataKind::Assignee, &state.assignees),
            ("reviewers", MetadataKind::Reviewer, &state.reviewers),
            ("labels", MetadataKind::Label, &state.labels),
            ("projects", MetadataKind::Project, &state.projects),
        ];
        for (param, kind, names) in lists {
            if names.is_empty() {
                continue;
            }
            let resolved = resolve_names(lookup, repo, kind, names).await?;
            url.params_mut().set(param, resolved.join(","));
        }

        if let Some(milestone) = state.milestones.first() {
            let resolved = resolve_name(lookup, repo, MetadataKind::Milestone, milestone).await?;
            url.params_mut().set("milestone", resolved);
        }
    }

    Ok(url.finish())
}

async fn resolve_names(
    lookup: &dyn MetadataLookup,
    repo: &RepoRef,
    kind: MetadataKind,
    names: &[String],
) -> QueryResult<Vec<String>> {
    tracing::debug!(kind = kind.noun(), count = names.len(), %repo, "resolving names");
    let mut resolved = Vec::with_capacity(names.len());
    for name in names {
        resolved.push(resolve_name(lookup, repo, kind, name).await?);
    }
    Ok(resolved)
}

async fn resolve_name(
    lookup: &dyn MetadataLookup,
    repo: &RepoRef,
    kind: MetadataKind,
    name: &str,
) -> QueryResult<String> {
    lookup
        .lookup(repo, kind, name)
        .await
        .map_err(|source| QueryError::resolution(format!("{} '{}'", kind.noun(), name), source))
}
