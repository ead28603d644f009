//! Typed GraphQL queries used for identity and name resolution.

use serde::Deserialize;
use serde_json::json;

use crate::client::GitHubClient;
use crate::error::{ApiError, Result};
use crate::repo::RepoRef;

const USER_CURRENT_QUERY: &str = "query UserCurrent { viewer { login } }";

const USER_LOGIN_QUERY: &str =
    "query UserLogin($login: String!) { user(login: $login) { login } }";

const REPOSITORY_LABEL_QUERY: &str = "query RepositoryLabel($owner: String!, $name: String!, $label: String!) { \
     repository(owner: $owner, name: $name) { label(name: $label) { name } } }";

const REPOSITORY_MILESTONES_QUERY: &str = "query RepositoryMilestones($owner: String!, $name: String!, $title: String!) { \
     repository(owner: $owner, name: $name) { \
     milestones(query: $title, first: 20, states: [OPEN]) { nodes { title } } } }";

const REPOSITORY_PROJECTS_QUERY: &str = "query RepositoryProjects($owner: String!, $name: String!, $search: String!) { \
     repository(owner: $owner, name: $name) { \
     projects(search: $search, first: 20, states: [OPEN]) { nodes { name resourcePath } } } }";

#[derive(Deserialize)]
struct Login {
    login: String,
}

#[derive(Deserialize)]
struct ViewerData {
    viewer: Login,
}

#[derive(Deserialize)]
struct UserData {
    user: Option<Login>,
}

#[derive(Deserialize)]
struct RepositoryData<T> {
    repository: Option<T>,
}

#[derive(Deserialize)]
struct NamedLabel {
    name: String,
}

#[derive(Deserialize)]
struct LabelRepository {
    label: Option<NamedLabel>,
}

#[derive(Deserialize)]
struct Nodes<T> {
    nodes: Vec<T>,
}

#[derive(Deserialize)]
struct Milestone {
    title: String,
}

#[derive(Deserialize)]
struct MilestoneRepository {
    milestones: Nodes<Milestone>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Project {
    name: String,
    resource_path: String,
}

#[derive(Deserialize)]
struct ProjectRepository {
    projects: Nodes<Project>,
}

fn not_found(resource: &str, name: &str) -> crate::error::Error {
    ApiError::NotFound {
        resource: resource.to_string(),
        name: name.to_string(),
    }
    .into()
}

fn repo_variables(repo: &RepoRef) -> serde_json::Value {
    json!({ "owner": repo.owner(), "name": repo.name() })
}

/// Converts `/OWNER/REPO/projects/1` into the `OWNER/REPO/1` form used by web forms.
pub fn project_resource_path_to_form_path(resource_path: &str) -> String {
    let trimmed = resource_path.trim_start_matches('/');
    match trimmed.rsplit_once("/projects/") {
        Some((scope, number)) => format!("{}/{}", scope, number),
        None => trimmed.to_string(),
    }
}

impl GitHubClient {
    /// Returns the login of the authenticated user on `host`.
    pub async fn current_login(&self, host: &str) -> Result<String> {
        let data: ViewerData = self.graphql(host, USER_CURRENT_QUERY, json!({})).await?;
        Ok(data.viewer.login)
    }

    /// Returns the canonical login for `login`, failing if no such user exists.
    pub async fn user_login(&self, host: &str, login: &str) -> Result<String> {
        let data: UserData = self
            .graphql(host, USER_LOGIN_QUERY, json!({ "login": login }))
            .await?;
        data.user
            .map(|user| user.login)
            .ok_or_else(|| not_found("user", login))
    }

    /// Returns the canonical name of a label in `repo`.
    pub async fn label_name(&self, repo: &RepoRef, label: &str) -> Result<String> {
        let mut variables = repo_variables(repo);
        variables["label"] = json!(label);
        let data: RepositoryData<LabelRepository> = self
            .graphql(repo.host(), REPOSITORY_LABEL_QUERY, variables)
            .await?;
        data.repository
            .ok_or_else(|| not_found("repository", &repo.to_string()))?
            .label
            .map(|found| found.name)
            .ok_or_else(|| not_found("label", label))
    }

    /// Returns the title of the open milestone in `repo` matching `title`
    /// case-insensitively.
    pub async fn milestone_title(&self, repo: &RepoRef, title: &str) -> Result<String> {
        let mut variables = repo_variables(repo);
        variables["title"] = json!(title);
        let data: RepositoryData<MilestoneRepository> = self
            .graphql(repo.host(), REPOSITORY_MILESTONES_QUERY, variables)
            .await?;
        data.repository
            .ok_or_else(|| not_found("repository", &repo.to_string()))?
            .milestones
            .nodes
            .into_iter()
            .find(|m| m.title.eq_ignore_ascii_case(title))
            .map(|m| m.title)
            .ok_or_else(|| not_found("milestone", title))
    }

    /// Returns the form path (`OWNER/REPO/NUMBER`) of the open project in
    /// `repo` named `name`.
    pub async fn project_path(&self, repo: &RepoRef, name: &str) -> Result<String> {
        let mut variables = repo_variables(repo);
        variables["search"] = json!(name);
        let data: RepositoryData<ProjectRepository> = self
            .graphql(repo.host(), REPOSITORY_PROJECTS_QUERY, variables)
            .await?;
        data.repository
            .ok_or_else(|| not_found("repository", &repo.to_string()))?
            .projects
            .nodes
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .map(|p| project_resource_path_to_form_path(&p.resource_path))
            .ok_or_else(|| not_found("project", name))
    }
}
