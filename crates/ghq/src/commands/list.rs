//! List-url command implementation.
//!
//! Prints the web URL of an issue or pull request listing with its search
//! filter encoded in the `q` parameter.

use gh_api_rs::repo::RepoRef;
use gh_query_rs::{list_url_with_query, Entity, FilterOptions, MeReplacer, ViewerLookup, ME_TOKEN};
use serde::Serialize;

use super::{CommandContext, CommandError, Result};
use crate::cli::ListFilterArgs;

/// Options for the list-url command.
#[derive(Debug, Clone)]
pub struct ListUrlOptions {
    /// Repository argument as typed.
    pub repo: String,
    /// Filter before `@me` resolution.
    pub filter: FilterOptions,
}

impl ListUrlOptions {
    /// Builds options from the shared listing flags.
    pub fn from_args(entity: Entity, args: &ListFilterArgs, state: &str) -> Self {
        Self {
            repo: args.repo.clone(),
            filter: FilterOptions {
                state: state.to_string(),
                assignee: args.assignee.clone(),
                author: args.author.clone(),
                mention: args.mention.clone(),
                labels: args.label.clone(),
                milestone: args.milestone.clone(),
                search: args.search.clone(),
                ..FilterOptions::new(entity)
            },
        }
    }
}

/// A built listing URL.
#[derive(Debug, Serialize)]
pub struct ListUrl {
    pub url: String,
    pub query: String,
    pub repo: String,
}

/// Returns true if any person field is `@me`.
fn needs_viewer(filter: &FilterOptions) -> bool {
    [&filter.assignee, &filter.author, &filter.mention]
        .into_iter()
        .any(|field| field.as_deref() == Some(ME_TOKEN))
}

fn listing_path(entity: Entity) -> &'static str {
    match entity {
        Entity::Issue => "issues",
        Entity::PullRequest => "pulls",
    }
}

/// Resolves `@me` in `filter` and encodes it onto the listing URL of `repo`.
pub async fn build(
    repo: &RepoRef,
    filter: &FilterOptions,
    viewer: Option<&dyn ViewerLookup>,
) -> Result<ListUrl> {
    let resolved = if needs_viewer(filter) {
        let viewer = viewer.ok_or_else(|| {
            CommandError::Config("a GitHub token is required to resolve @me".to_string())
        })?;
        MeReplacer::new(viewer, repo.host())
            .replace_filter(filter)
            .await?
    } else {
        filter.clone()
    };

    let base = format!("{}/{}", repo.web_url(), listing_path(resolved.entity));
    let url = list_url_with_query(&base, &resolved)?;
    tracing::debug!(%repo, %url, "built listing URL");

    Ok(ListUrl {
        url,
        query: resolved.search_query(),
        repo: repo.to_string(),
    })
}

/// Executes the list-url command.
pub async fn execute(ctx: &CommandContext, opts: &ListUrlOptions) -> Result<()> {
    let repo = ctx.resolve_repo(&opts.repo)?;

    let client = if needs_viewer(&opts.filter) {
        Some(ctx.require_client("resolve @me")?)
    } else {
        None
    };
    let viewer = client.as_ref().map(|c| c as &dyn ViewerLookup);

    let listing = build(&repo, &opts.filter, viewer).await?;

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        println!("{}", listing.url);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gh_api_rs::error::Result as ApiResult;

    struct FixedViewer(&'static str);

    #[async_trait]
    impl ViewerLookup for FixedViewer {
        async fn current_login(&self, _host: &str) -> ApiResult<String> {
            Ok(self.0.to_string())
        }
    }

    fn args(repo: &str) -> ListFilterArgs {
        ListFilterArgs {
            repo: repo.to_string(),
            assignee: None,
            author: None,
            mention: None,
            label: Vec::new(),
            milestone: None,
            search: None,
        }
    }

    #[tokio::test]
    async fn test_issue_listing_url() {
        let mut filter_args = args("cli/cli");
        filter_args.label = vec!["help wanted".to_string()];
        let opts = ListUrlOptions::from_args(Entity::Issue, &filter_args, "open");

        let listing = build(&RepoRef::new("cli", "cli"), &opts.filter, None)
            .await
            .unwrap();

        assert_eq!(
            listing.url,
            "https://github.com/cli/cli/issues?q=is%3Aissue+is%3Aopen+label%3A%22help+wanted%22"
        );
        assert_eq!(listing.query, "is:issue is:open label:\"help wanted\"");
        assert_eq!(listing.repo, "cli/cli");
    }

    #[tokio::test]
    async fn test_pull_request_listing_with_me() {
        let mut filter_args = args("cli/cli");
        filter_args.author = Some("@me".to_string());
        let mut opts = ListUrlOptions::from_args(Entity::PullRequest, &filter_args, "merged");
        opts.filter.base_branch = Some("trunk".to_string());

        let viewer = FixedViewer("monalisa");
        let listing = build(&RepoRef::new("cli", "cli"), &opts.filter, Some(&viewer))
            .await
            .unwrap();

        assert_eq!(
            listing.url,
            "https://github.com/cli/cli/pulls?q=is%3Apr+is%3Amerged+author%3Amonalisa+base%3Atrunk"
        );
    }

    #[tokio::test]
    async fn test_all_state_on_enterprise_host() {
        let opts = ListUrlOptions::from_args(Entity::Issue, &args("o/r"), "all");
        let repo = RepoRef::with_host("ghe.io", "o", "r");

        let listing = build(&repo, &opts.filter, None).await.unwrap();

        assert_eq!(listing.url, "https://ghe.io/o/r/issues?q=is%3Aissue");
        assert_eq!(listing.repo, "ghe.io/o/r");
    }

    #[tokio::test]
    async fn test_me_without_viewer_is_config_error() {
        let mut filter_args = args("cli/cli");
        filter_args.mention = Some("@me".to_string());
        let opts = ListUrlOptions::from_args(Entity::Issue, &filter_args, "open");

        let err = build(&RepoRef::new("cli", "cli"), &opts.filter, None)
            .await
            .unwrap_err();

        assert!(matches!(err, CommandError::Config(_)));
    }

    #[test]
    fn test_needs_viewer() {
        let mut filter = FilterOptions::new(Entity::Issue);
        assert!(!needs_viewer(&filter));
        filter.labels = vec!["@me".to_string()];
        assert!(!needs_viewer(&filter));
        filter.assignee = Some("@me".to_string());
        assert!(needs_viewer(&filter));
    }

    #[tokio::test]
    async fn test_me_resolved_through_client() {
        use gh_api_rs::client::GitHubClient;
        use wiremock::matchers::{body_string_contains, method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("query UserCurrent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "viewer": { "login": "hubot" } }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            GitHubClient::with_graphql_url("test-token", format!("{}/graphql", server.uri()))
                .unwrap();
        let mut filter_args = args("cli/cli");
        filter_args.assignee = Some("@me".to_string());
        filter_args.mention = Some("@me".to_string());
        let opts = ListUrlOptions::from_args(Entity::Issue, &filter_args, "closed");

        let listing = build(&RepoRef::new("cli", "cli"), &opts.filter, Some(&client))
            .await
            .unwrap();

        assert_eq!(
            listing.url,
            "https://github.com/cli/cli/issues?q=is%3Aissue+is%3Aclosed+assignee%3Ahubot+mentions%3Ahubot"
        );
    }
}
