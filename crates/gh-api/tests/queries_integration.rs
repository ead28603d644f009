//! Integration tests for the repository-scoped name queries.

use gh_api_rs::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GitHubClient {
    GitHubClient::with_graphql_url("test-token", format!("{}/graphql", server.uri())).unwrap()
}

async fn mount(server: &MockServer, operation: &str, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains(operation))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_label_name_returns_canonical_name() {
    let server = MockServer::start().await;
    mount(
        &server,
        "query RepositoryLabel",
        json!({ "data": { "repository": { "label": { "name": "help wanted" } } } }),
    )
    .await;

    let client = client_for(&server);
    let repo = RepoRef::new("OWNER", "REPO");
    let name = client.label_name(&repo, "Help Wanted").await.unwrap();

    assert_eq!(name, "help wanted");
}

#[tokio::test]
async fn test_label_name_missing_label_is_not_found() {
    let server = MockServer::start().await;
    mount(
        &server,
        "query RepositoryLabel",
        json!({ "data": { "repository": { "label": null } } }),
    )
    .await;

    let client = client_for(&server);
    let err = client
        .label_name(&RepoRef::new("OWNER", "REPO"), "nope")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Api(ApiError::NotFound { ref resource, .. }) if resource == "label"
    ));
}

#[tokio::test]
async fn test_milestone_title_matches_case_insensitively() {
    let server = MockServer::start().await;
    mount(
        &server,
        "query RepositoryMilestones",
        json!({ "data": { "repository": { "milestones": { "nodes": [
            { "title": "v1.0 beta" },
            { "title": "v1.0" }
        ] } } } }),
    )
    .await;

    let client = client_for(&server);
    let title = client
        .milestone_title(&RepoRef::new("OWNER", "REPO"), "V1.0")
        .await
        .unwrap();

    assert_eq!(title, "v1.0");
}

#[tokio::test]
async fn test_project_path_converts_resource_path() {
    let server = MockServer::start().await;
    mount(
        &server,
        "query RepositoryProjects",
        json!({ "data": { "repository": { "projects": { "nodes": [
            { "name": "Roadmap", "resourcePath": "/OWNER/REPO/projects/7" }
        ] } } } }),
    )
    .await;

    let client = client_for(&server);
    let project = client
        .project_path(&RepoRef::new("OWNER", "REPO"), "roadmap")
        .await
        .unwrap();

    assert_eq!(project, "OWNER/REPO/7");
}

#[tokio::test]
async fn test_missing_repository_is_not_found() {
    let server = MockServer::start().await;
    mount(
        &server,
        "query RepositoryProjects",
        json!({ "data": { "repository": null } }),
    )
    .await;

    let client = client_for(&server);
    let err = client
        .project_path(&RepoRef::new("OWNER", "GONE"), "Roadmap")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "repository not found: OWNER/GONE");
}
