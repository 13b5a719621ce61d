//! Client tests against a mocked remote API.

use issue_scout_github::{CreateIssueRequest, GitHubClient, GitHubError, ListIssuesOptions};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn issue_json(id: i64, number: i64, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "number": number,
        "title": title,
        "body": "some body",
        "state": "open",
        "labels": [{"name": "bug", "color": "d73a4a"}],
        "user": {"login": "octocat"},
        "assignee": null,
        "comments": 2,
        "created_at": "2026-01-10T10:00:00Z",
        "updated_at": "2026-01-11T10:00:00Z",
        "closed_at": null,
        "reactions": {"total_count": 4}
    })
}

#[tokio::test]
async fn list_issues_sends_pagination_params_and_decodes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/issues"))
        .and(query_param("state", "open"))
        .and(query_param("sort", "updated"))
        .and(query_param("direction", "desc"))
        .and(query_param("per_page", "100"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            issue_json(1, 101, "Panic in parser"),
            issue_json(2, 102, "Deadlock in scheduler"),
        ])))
        .mount(&server)
        .await;

    let client = GitHubClient::new(None)
        .unwrap()
        .with_base_url(server.uri());
    let issues = client
        .list_issues("acme", "widgets", &ListIssuesOptions::default())
        .await
        .unwrap();

    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].number, 101);
    assert_eq!(issues[0].reactions.as_ref().unwrap().total_count, 4);
    assert!(!issues[0].is_pull_request());
}

#[tokio::test]
async fn pull_requests_are_identifiable() {
    let server = MockServer::start().await;

    let mut pr = issue_json(3, 103, "Some PR");
    pr["pull_request"] = json!({"url": "https://example.invalid/pr/103"});

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([pr])))
        .mount(&server)
        .await;

    let client = GitHubClient::new(None)
        .unwrap()
        .with_base_url(server.uri());
    let issues = client
        .list_issues("acme", "widgets", &ListIssuesOptions::default())
        .await
        .unwrap();

    assert!(issues[0].is_pull_request());
}

#[tokio::test]
async fn token_is_sent_as_bearer_auth() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/issues"))
        .and(header("authorization", "Bearer sekrit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = GitHubClient::new(Some("sekrit".into()))
        .unwrap()
        .with_base_url(server.uri());
    client
        .list_issues("acme", "widgets", &ListIssuesOptions::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn non_success_maps_to_api_error_with_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/issues"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})),
        )
        .mount(&server)
        .await;

    let client = GitHubClient::new(None)
        .unwrap()
        .with_base_url(server.uri());
    let err = client
        .list_issues("acme", "widgets", &ListIssuesOptions::default())
        .await
        .unwrap_err();

    match err {
        GitHubError::Api { status, message } => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(message, "Not Found");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn exhausted_rate_limit_is_distinguished() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/issues"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-remaining", "0")
                .set_body_json(json!({"message": "API rate limit exceeded"})),
        )
        .mount(&server)
        .await;

    let client = GitHubClient::new(None)
        .unwrap()
        .with_base_url(server.uri());
    let err = client
        .list_issues("acme", "widgets", &ListIssuesOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, GitHubError::RateLimited));
}

#[tokio::test]
async fn create_issue_posts_body_and_returns_record() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/acme/widgets/issues"))
        .and(body_partial_json(json!({
            "title": "New bug",
            "labels": ["bug", "p1"]
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(issue_json(9, 110, "New bug")),
        )
        .mount(&server)
        .await;

    let client = GitHubClient::new(None)
        .unwrap()
        .with_base_url(server.uri());
    let created = client
        .create_issue(
            "acme",
            "widgets",
            &CreateIssueRequest {
                title: "New bug".into(),
                body: Some("details".into()),
                labels: vec!["bug".into(), "p1".into()],
            },
        )
        .await
        .unwrap();

    assert_eq!(created.number, 110);
}

#[tokio::test]
async fn list_comments_decodes_thread() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/issues/101/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 501,
            "body": "same here",
            "user": {"login": "hubot"},
            "created_at": "2026-01-12T08:00:00Z",
            "updated_at": "2026-01-12T08:00:00Z"
        }])))
        .mount(&server)
        .await;

    let client = GitHubClient::new(None)
        .unwrap()
        .with_base_url(server.uri());
    let comments = client.list_comments("acme", "widgets", 101).await.unwrap();

    assert_eq!(comments.len(), 1);
    let comment = comments[0].clone().into_comment("acme/widgets", 101);
    assert_eq!(comment.author.as_deref(), Some("hubot"));
    assert_eq!(comment.issue_number, 101);
}

#[tokio::test]
async fn discussions_graphql_pass_through() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "repository": {
                    "discussions": {
                        "nodes": [{
                            "id": "D_abc123",
                            "number": 12,
                            "title": "Roadmap Q3",
                            "body": "what's planned",
                            "url": "https://example.invalid/d/12",
                            "createdAt": "2026-02-01T00:00:00Z",
                            "author": {"login": "octocat"}
                        }]
                    }
                }
            }
        })))
        .mount(&server)
        .await;

    let client = GitHubClient::new(None)
        .unwrap()
        .with_base_url(server.uri());
    let discussions = client.list_discussions("acme", "widgets", 10).await.unwrap();

    assert_eq!(discussions.len(), 1);
    assert_eq!(discussions[0].number, 12);
    assert_eq!(discussions[0].author.as_deref(), Some("octocat"));
}
