//! Remote lookup capabilities consumed by the resolver and the form builder.
//!
//! Both are traits so callers can pass a real [`GitHubClient`] or a stub.

use async_trait::async_trait;
use gh_api_rs::client::GitHubClient;
use gh_api_rs::error::Result;
use gh_api_rs::repo::RepoRef;

/// Answers "who am I" for a host.
#[async_trait]
pub trait ViewerLookup: Send + Sync {
    /// Returns the login of the authenticated user on `host`.
    async fn current_login(&self, host: &str) -> Result<String>;
}

/// The kinds of names a creation form can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKind {
    Assignee,
    Reviewer,
    Label,
    Milestone,
    Project,
}

impl MetadataKind {
    /// Singular noun used in messages.
    pub fn noun(&self) -> &'static str {
        match self {
            MetadataKind::Assignee => "assignee",
            MetadataKind::Reviewer => "reviewer",
            MetadataKind::Label => "label",
            MetadataKind::Milestone => "milestone",
            MetadataKind::Project => "project",
        }
    }
}

/// Resolves a human-readable name to the identifier a form expects.
#[async_trait]
pub trait MetadataLookup: Send + Sync {
    async fn lookup(&self, repo: &RepoRef, kind: MetadataKind, name: &str) -> Result<String>;
}

#[async_trait]
impl ViewerLookup for GitHubClient {
    async fn current_login(&self, host: &str) -> Result<String> {
        GitHubClient::current_login(self, host).await
    }
}

#[async_trait]
impl MetadataLookup for GitHubClient {
    async fn lookup(&self, repo: &RepoRef, kind: MetadataKind, name: &str) -> Result<String> {
        match kind {
            MetadataKind::Assignee | MetadataKind::Reviewer => {
                self.user_login(repo.host(), name).await
            }
            MetadataKind::Label => self.label_name(repo, name).await,
            MetadataKind::Milestone => self.milestone_title(repo, name).await,
            MetadataKind::Project => self.project_path(repo, name).await,
        }
    }
}
