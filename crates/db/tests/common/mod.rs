//! Shared fixtures for the db integration tests.
#![allow(dead_code)] // each test binary uses a subset of these helpers

use chrono::{DateTime, TimeZone, Utc};
use issue_scout_types::{Issue, IssueState, Label, RepositoryConfig};

pub fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

/// A minimal issue with sensible defaults; tweak fields per test.
pub fn make_issue(id: i64, repository: &str, number: i64, title: &str) -> Issue {
    Issue {
        id,
        number,
        repository: repository.to_string(),
        title: title.to_string(),
        body: String::new(),
        state: IssueState::Open,
        labels: vec![Label {
            name: "bug".into(),
            color: "d73a4a".into(),
        }],
        author: Some("octocat".into()),
        assignee: None,
        created_at: ts(1_700_000_000),
        updated_at: ts(1_700_000_000 + id),
        closed_at: None,
        comment_count: 0,
        reactions: 0,
        search_vector: title.to_lowercase(),
    }
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
