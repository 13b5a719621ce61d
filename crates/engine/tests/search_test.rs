//! Single-repository search: ordering, filtering, and cache behavior.

use issue_scout_db::Database;
use issue_scout_engine::{EngineError, RepoSearch, SearchOptions};
use issue_scout_types::IssueState;

mod common;
use common::{db_with_repo, make_issue, make_repo};

async fn seeded_db() -> Database {
    let db = db_with_repo("acme", "widgets").await;
    // Three issues with very different relevance for "panic".
    let strong = make_issue(1, "acme/widgets", 101, "Panic in parser", "panics on empty input");
    let medium = make_issue(2, "acme/widgets", 102, "Crash report", "stack shows a panic deep in codegen");
    let weak = make_issue(3, "acme/widgets", 103, "Docs typo", "fix spelling");
    for issue in [&strong, &medium, &weak] {
        db.upsert_issue(issue).await.unwrap();
    }
    db
}

#[tokio::test]
async fn results_sorted_descending_and_filtered_by_min_relevance() {
    let db = seeded_db().await;
    let search = RepoSearch::new(db);

    let results = search
        .search("acme/widgets", "panic", &SearchOptions::default())
        .await
        .unwrap();

    // The no-match issue is filtered out entirely.
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].issue.number, 101);
    assert_eq!(results[1].issue.number, 102);
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score, "results must be descending");
    }
    for result in &results {
        assert!(result.score >= SearchOptions::default().min_relevance);
        assert!(result.score <= 1.0);
    }
}

#[tokio::test]
async fn limit_truncates_results() {
    let db = seeded_db().await;
    let search = RepoSearch::new(db);

    let options = SearchOptions {
        limit: 1,
        ..Default::default()
    };
    let results = search.search("acme/widgets", "panic", &options).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].issue.number, 101);
}

#[tokio::test]
async fn state_filter_restricts_candidates() {
    let db = db_with_repo("acme", "widgets").await;
    let open = make_issue(1, "acme/widgets", 101, "Panic in parser", "");
    let mut closed = make_issue(2, "acme/widgets", 102, "Panic in lexer", "");
    closed.state = IssueState::Closed;
    db.upsert_issue(&open).await.unwrap();
    db.upsert_issue(&closed).await.unwrap();

    let search = RepoSearch::new(db);
    let options = SearchOptions {
        state: Some(IssueState::Open),
        ..Default::default()
    };
    let results = search.search("acme/widgets", "panic", &options).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].issue.number, 101);
}

#[tokio::test]
async fn cache_hit_serves_previous_result_set() {
    let db = seeded_db().await;
    let search = RepoSearch::new(db.clone());

    let first = search
        .search("acme/widgets", "panic", &SearchOptions::default())
        .await
        .unwrap();

    // A better-matching issue arrives after the first search.
    db.upsert_issue(&make_issue(
        9,
        "acme/widgets",
        109,
        "Panic panic panic",
        "panic everywhere",
    ))
    .await
    .unwrap();

    // Cached: the new issue is not visible for this exact query yet.
    let cached = search
        .search("acme/widgets", "panic", &SearchOptions::default())
        .await
        .unwrap();
    let cached_numbers: Vec<i64> = cached.iter().map(|r| r.issue.number).collect();
    let first_numbers: Vec<i64> = first.iter().map(|r| r.issue.number).collect();
    assert_eq!(cached_numbers, first_numbers);

    // Bypassing the cache sees it immediately.
    let uncached = search
        .search(
            "acme/widgets",
            "panic",
            &SearchOptions {
                use_cache: false,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(uncached[0].issue.number, 109);
}

#[tokio::test]
async fn empty_result_sets_are_not_cached() {
    let db = seeded_db().await;
    let search = RepoSearch::new(db.clone());

    let none = search
        .search("acme/widgets", "zebra", &SearchOptions::default())
        .await
        .unwrap();
    assert!(none.is_empty());

    // A matching issue added afterwards is visible right away — no empty
    // entry was written for the query.
    db.upsert_issue(&make_issue(9, "acme/widgets", 109, "Zebra stripes", ""))
        .await
        .unwrap();
    let found = search
        .search("acme/widgets", "zebra", &SearchOptions::default())
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn unknown_repository_is_a_typed_error() {
    let db = Database::new_in_memory().await.unwrap();
    let search = RepoSearch::new(db);

    let err = search
        .search("acme/unregistered", "panic", &SearchOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::UnknownRepository(_)));
}

#[tokio::test]
async fn disabled_repository_is_a_typed_error() {
    let db = Database::new_in_memory().await.unwrap();
    db.upsert_repository(&make_repo("acme", "dormant", 0, false))
        .await
        .unwrap();
    let search = RepoSearch::new(db);

    let err = search
        .search("acme/dormant", "panic", &SearchOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::RepositoryDisabled(_)));
}
