//! Sync engine tests against a mocked remote API and an in-memory store.

use issue_scout_db::Database;
use issue_scout_engine::{SyncEngine, SyncOptions};
use issue_scout_github::{CreateIssueRequest, GitHubClient};
use issue_scout_types::SyncStatus;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

fn remote_issue(id: i64, number: i64, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "number": number,
        "title": title,
        "body": "reproduction steps attached",
        "state": "open",
        "labels": [{"name": "bug", "color": "d73a4a"}],
        "user": {"login": "octocat"},
        "assignee": null,
        "comments": 1,
        "created_at": "2026-01-10T10:00:00Z",
        "updated_at": "2026-07-01T10:00:00Z",
        "closed_at": null,
        "reactions": {"total_count": 2}
    })
}

async fn engine_against(server: &MockServer) -> (SyncEngine, Database) {
    let db = common::db_with_repo("acme", "widgets").await;
    let client = GitHubClient::new(None).unwrap().with_base_url(server.uri());
    (SyncEngine::new(db.clone(), client), db)
}

#[tokio::test]
async fn sync_upserts_builds_vectors_and_reports_progress() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            remote_issue(1, 101, "Panic in parser"),
            remote_issue(2, 102, "Deadlock in scheduler"),
        ])))
        .mount(&server)
        .await;

    let (engine, db) = engine_against(&server).await;

    let mut progress = Vec::new();
    let report = engine
        .sync_with_progress(&SyncOptions::for_repository("acme/widgets"), |p| {
            progress.push((p.synced, p.current_number));
        })
        .await
        .unwrap();

    assert_eq!(report.upserted, 2);
    assert_eq!(report.total_issues, 2);
    assert_eq!(progress, vec![(1, 101), (2, 102)]);

    let stored = db.get_issue("acme/widgets", 101).await.unwrap().unwrap();
    assert!(stored.search_vector.contains("panic"));
    assert!(stored.search_vector.contains("bug"));

    let meta = db.get_sync_metadata("acme/widgets").await.unwrap().unwrap();
    assert_eq!(meta.status, SyncStatus::Idle);
    assert_eq!(meta.total_issues, 2);
}

#[tokio::test]
async fn sync_twice_with_identical_data_is_idempotent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            remote_issue(1, 101, "Panic in parser"),
            remote_issue(2, 102, "Deadlock in scheduler"),
        ])))
        .mount(&server)
        .await;

    let (engine, db) = engine_against(&server).await;
    let options = SyncOptions::for_repository("acme/widgets");

    engine.sync(&options).await.unwrap();
    let report = engine.sync(&options).await.unwrap();

    // Same remote data: row count unchanged, metadata reflects the actual
    // count rather than accumulating.
    assert_eq!(db.issue_count("acme/widgets").await.unwrap(), 2);
    assert_eq!(report.total_issues, 2);
    let meta = db.get_sync_metadata("acme/widgets").await.unwrap().unwrap();
    assert_eq!(meta.total_issues, 2);
}

#[tokio::test]
async fn pull_requests_are_skipped() {
    let server = MockServer::start().await;
    let mut pr = remote_issue(3, 103, "Fix everything");
    pr["pull_request"] = json!({"url": "https://example.invalid/pr/103"});

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            remote_issue(1, 101, "Panic in parser"),
            pr,
        ])))
        .mount(&server)
        .await;

    let (engine, db) = engine_against(&server).await;
    let report = engine
        .sync(&SyncOptions::for_repository("acme/widgets"))
        .await
        .unwrap();

    assert_eq!(report.fetched, 2);
    assert_eq!(report.skipped_pull_requests, 1);
    assert_eq!(report.upserted, 1);
    assert_eq!(db.issue_count("acme/widgets").await.unwrap(), 1);
}

#[tokio::test]
async fn failed_sync_records_error_and_keeps_existing_rows() {
    let server = MockServer::start().await;
    // First page succeeds...
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            remote_issue(1, 101, "Panic in parser"),
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    // ...then the remote starts failing.
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/issues"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "Server Error"})),
        )
        .mount(&server)
        .await;

    let (engine, db) = engine_against(&server).await;
    let options = SyncOptions::for_repository("acme/widgets");

    engine.sync(&options).await.unwrap();
    let err = engine.sync(&options).await.unwrap_err();
    assert!(err.to_string().contains("Server Error"), "got: {err}");

    // No rollback of previously-synced rows; metadata records the failure.
    assert_eq!(db.issue_count("acme/widgets").await.unwrap(), 1);
    let meta = db.get_sync_metadata("acme/widgets").await.unwrap().unwrap();
    assert_eq!(meta.status, SyncStatus::Error);
    assert!(meta.error.unwrap().contains("Server Error"));
}

#[tokio::test]
async fn malformed_repository_is_a_typed_error() {
    let server = MockServer::start().await;
    let (engine, _db) = engine_against(&server).await;

    let err = engine
        .sync(&SyncOptions::for_repository("not-a-repo"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        issue_scout_engine::EngineError::InvalidRepository(_)
    ));
}

#[tokio::test]
async fn fetch_comments_mirrors_locally() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/issues/101/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 501,
            "body": "same here on 1.72",
            "user": {"login": "hubot"},
            "created_at": "2026-07-02T08:00:00Z",
            "updated_at": "2026-07-02T08:00:00Z"
        }])))
        .mount(&server)
        .await;

    let (engine, db) = engine_against(&server).await;
    let comments = engine.fetch_comments("acme/widgets", 101).await.unwrap();

    assert_eq!(comments.len(), 1);
    let stored = db.comments_for_issue("acme/widgets", 101).await.unwrap();
    assert_eq!(stored, comments);
}

#[tokio::test]
async fn create_issue_passes_through_and_mirrors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/acme/widgets/issues"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(remote_issue(9, 110, "New panic report")),
        )
        .mount(&server)
        .await;

    let (engine, db) = engine_against(&server).await;
    let created = engine
        .create_issue(
            "acme/widgets",
            &CreateIssueRequest {
                title: "New panic report".into(),
                body: Some("details".into()),
                labels: vec!["bug".into()],
            },
        )
        .await
        .unwrap();

    assert_eq!(created.number, 110);
    // Immediately searchable: mirrored with a fresh vector.
    let stored = db.get_issue("acme/widgets", 110).await.unwrap().unwrap();
    assert!(stored.search_vector.contains("panic"));
}

#[tokio::test]
async fn clear_cache_wipes_mirrored_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            remote_issue(1, 101, "Panic in parser"),
        ])))
        .mount(&server)
        .await;

    let (engine, db) = engine_against(&server).await;
    engine
        .sync(&SyncOptions::for_repository("acme/widgets"))
        .await
        .unwrap();

    engine.clear_cache().await.unwrap();

    assert_eq!(db.issue_count("acme/widgets").await.unwrap(), 0);
    assert!(db.get_sync_metadata("acme/widgets").await.unwrap().is_none());
    // Config survives a cache clear.
    assert!(db.get_repository("acme/widgets").await.unwrap().is_some());
}
