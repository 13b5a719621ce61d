//! Shared fixtures for engine integration tests.
#![allow(dead_code)] // each test binary uses a subset of these helpers

use chrono::{DateTime, Duration, TimeZone, Utc};
use issue_scout_db::Database;
use issue_scout_types::{Issue, IssueState, Label, RepositoryConfig};

pub fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

/// An issue whose vector is already built, recently updated so variant-2
/// recency boosts behave predictably in tests.
pub fn make_issue(id: i64, repository: &str, number: i64, title: &str, body: &str) -> Issue {
    let mut issue = Issue {
        id,
        number,
        repository: repository.to_string(),
        title: title.to_string(),
        body: body.to_string(),
        state: IssueState::Open,
        labels: vec![Label {
            name: "bug".into(),
            color: "d73a4a".into(),
        }],
        author: Some("octocat".into()),
        assignee: None,
        created_at: Utc::now() - Duration::days(30),
        updated_at: Utc::now() - Duration::days(1),
        closed_at: None,
        comment_count: 0,
        reactions: 0,
        search_vector: String::new(),
    };
    issue.search_vector = issue_scout_search::build_issue_vector(&issue);
    issue
}

pub fn make_repo(owner: &str, name: &str, priority: i64, enabled: bool) -> RepositoryConfig {
    RepositoryConfig {
        owner: owner.to_string(),
        name: name.to_string(),
        token: None,
        priority,
        enabled,
        added_at: ts(1_700_000_000),
    }
}

/// In-memory store pre-loaded with one enabled repository config.
pub async fn db_with_repo(owner: &str, name: &str) -> Database {
    let db = Database::new_in_memory().await.unwrap();
    db.upsert_repository(&make_repo(owner, name, 0, true))
        .await
        .unwrap();
    db
}
