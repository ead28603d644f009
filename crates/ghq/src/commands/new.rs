//! New-url command implementation.
//!
//! Prints the web URL of a prefilled issue form or pull request comparison.
//! With a token, assignees, reviewers, labels, projects and the milestone are
//! checked against the repository; without one only title and body are kept.

use gh_api_rs::repo::RepoRef;
use gh_query_rs::{
    with_pr_and_issue_query_params, IssueMetadataState, MeReplacer, MetadataLookup, QueryError,
    ViewerLookup, ME_TOKEN,
};
use serde::Serialize;
use url::Url;

use super::{CommandContext, CommandError, Result};
use crate::cli::FormArgs;

/// Which form to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormTarget {
    Issue,
    PullRequest { head: String, base: Option<String> },
}

/// Options for the new-url command.
#[derive(Debug, Clone)]
pub struct NewUrlOptions {
    pub repo: String,
    pub target: FormTarget,
    pub state: IssueMetadataState,
}

impl NewUrlOptions {
    /// Builds options from the shared form flags.
    pub fn from_args(target: FormTarget, args: &FormArgs) -> Self {
        Self {
            repo: args.repo.clone(),
            target,
            state: IssueMetadataState {
                title: args.title.clone(),
                body: args.body.clone(),
                assignees: args.assignee.clone(),
                labels: args.label.clone(),
                milestones: args.milestone.iter().cloned().collect(),
                ..IssueMetadataState::default()
            },
        }
    }
}

/// A built form URL.
#[derive(Debug, Serialize)]
pub struct FormUrl {
    pub url: String,
    pub repo: String,
    /// False when metadata fields were dropped for lack of a token.
    pub resolved: bool,
}

/// Web URL of the form, with each branch name escaped as path text.
///
/// Slashes inside branch names stay literal, matching how GitHub spells
/// compare ranges such as `main...feature/login`.
fn form_base_url(repo: &RepoRef, target: &FormTarget) -> Result<String> {
    let web_url = repo.web_url();
    let mut url = Url::parse(&web_url).map_err(|e| QueryError::malformed_url(&web_url, e))?;

    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| CommandError::Config(format!("{} cannot carry a path", web_url)))?;
        match target {
            FormTarget::Issue => {
                segments.extend(["issues", "new"]);
            }
            FormTarget::PullRequest { head, base } => {
                let range = match base {
                    Some(base) => format!("{}...{}", base, head),
                    None => head.clone(),
                };
                segments.push("compare").extend(range.split('/'));
            }
        }
    }

    if matches!(target, FormTarget::PullRequest { .. }) {
        url.query_pairs_mut().append_pair("expand", "1");
    }
    Ok(url.into())
}

fn needs_viewer(state: &IssueMetadataState) -> bool {
    state
        .assignees
        .iter()
        .chain(&state.reviewers)
        .any(|handle| handle == ME_TOKEN)
}

/// Remote access used to build a form URL.
pub trait FormLookup: Send + Sync {
    fn viewer(&self) -> &dyn ViewerLookup;
    fn metadata(&self) -> &dyn MetadataLookup;
}

impl<T: MetadataLookup + ViewerLookup> FormLookup for T {
    fn viewer(&self) -> &dyn ViewerLookup {
        self
    }

    fn metadata(&self) -> &dyn MetadataLookup {
        self
    }
}

/// Builds the form URL for `opts`, resolving names through `lookup`.
///
/// Without `lookup` the URL is built offline. `@me` cannot be resolved
/// offline and is reported as a configuration error.
pub async fn build(
    repo: &RepoRef,
    target: &FormTarget,
    state: &IssueMetadataState,
    lookup: Option<&dyn FormLookup>,
) -> Result<FormUrl> {
    let mut state = state.clone();

    if needs_viewer(&state) {
        let remote = lookup.ok_or_else(|| {
            CommandError::Config("a GitHub token is required to resolve @me".to_string())
        })?;
        let mut me = MeReplacer::new(remote.viewer(), repo.host());
        state.assignees = me.replace_slice(&state.assignees).await?;
        state.reviewers = me.replace_slice(&state.reviewers).await?;
    }

    let base = form_base_url(repo, target)?;
    let metadata = lookup.map(|l| l.metadata());
    let url = with_pr_and_issue_query_params(metadata, Some(repo), &base, &state).await?;

    Ok(FormUrl {
        url,
        repo: repo.to_string(),
        resolved: lookup.is_some() || !state.has_metadata(),
    })
}

/// Executes the new-url command.
pub async fn execute(ctx: &CommandContext, opts: &NewUrlOptions) -> Result<()> {
    let repo = ctx.resolve_repo(&opts.repo)?;
    let client = ctx.client()?;

    if client.is_none() && opts.state.has_metadata() && !needs_viewer(&opts.state) {
        tracing::warn!(
            "no GitHub token configured; assignees, reviewers, labels, projects and milestone are left out"
        );
    }

    let lookup = client.as_ref().map(|c| c as &dyn FormLookup);
    let form = build(&repo, &opts.target, &opts.state, lookup).await?;

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&form)?);
    } else {
        println!("{}", form.url);
    }

    Ok(())
}
