//! Sync engine: one remote page per invocation, upserted into the store.
//!
//! Pagination across pages is the caller's responsibility (repeated calls
//! with an increasing `page`). Everything written here is an upsert keyed by
//! the remote's stable identifiers, so a failed or repeated sync never needs
//! rollback — retrying is always safe.

use chrono::Utc;
use issue_scout_db::Database;
use issue_scout_github::{CreateIssueRequest, GitHubClient, ListIssuesOptions, StateFilter};
use issue_scout_search::build_issue_vector;
use issue_scout_types::{Comment, Issue, SyncMetadata};
use serde::Serialize;
use tracing::{info, warn};
use ts_rs::TS;

use crate::{client_for, config_if_registered, split_full_name, EngineResult};

/// Parameters for one sync page.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Target repository as `owner/name`.
    pub repository: String,
    pub state: StateFilter,
    /// `created`, `updated`, or `comments`.
    pub sort: String,
    /// `asc` or `desc`.
    pub direction: String,
    pub per_page: u32,
    pub page: u32,
}

impl SyncOptions {
    pub fn for_repository(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            state: StateFilter::Open,
            sort: "updated".into(),
            direction: "desc".into(),
            per_page: 100,
            page: 1,
        }
    }
}

/// Progress snapshot reported after each upserted record.
#[derive(Debug, Clone, Copy)]
pub struct SyncProgress {
    /// Records upserted so far on this page.
    pub synced: usize,
    /// Records fetched on this page (pull requests included).
    pub fetched: usize,
    /// Sequence number of the record just written.
    pub current_number: i64,
}

/// Outcome of one successful sync page.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub repository: String,
    /// Records on the fetched page, pull requests included.
    pub fetched: usize,
    /// Pull requests skipped (the list endpoint interleaves them).
    pub skipped_pull_requests: usize,
    /// Issues upserted from this page.
    pub upserted: usize,
    /// Issue rows in the store for this repository after the page — an
    /// absolute count, not a running total.
    pub total_issues: i64,
}

/// The one component that talks to the remote tracker and writes rows:
/// bulk issue sync, lazy comment fetch, and the issue-create pass-through.
#[derive(Debug, Clone)]
pub struct SyncEngine {
    db: Database,
    client: GitHubClient,
}

impl SyncEngine {
    pub fn new(db: Database, client: GitHubClient) -> Self {
        Self { db, client }
    }

    /// Sync one page of issues. See [`Self::sync_with_progress`].
    pub async fn sync(&self, options: &SyncOptions) -> EngineResult<SyncReport> {
        self.sync_with_progress(options, |_| {}).await
    }

    /// Sync one page of issues, invoking `on_progress` after each record.
    ///
    /// Skips records that are actually pull requests, rebuilds each kept
    /// record's search vector, and upserts. On success the scope's metadata
    /// goes back to `idle` with counts read back from the store. On any
    /// error the metadata records `error` + message and the error is
    /// re-raised — rows upserted before the failure stay put.
    pub async fn sync_with_progress(
        &self,
        options: &SyncOptions,
        on_progress: impl FnMut(SyncProgress),
    ) -> EngineResult<SyncReport> {
        let scope = options.repository.as_str();
        let (owner, name) = split_full_name(scope)?;

        self.db.mark_sync_started(scope).await?;

        match self.run_page(owner, name, options, on_progress).await {
            Ok(report) => {
                let total_comments = self.db.comment_count(scope).await?;
                self.db
                    .mark_sync_complete(scope, report.total_issues, total_comments, Utc::now())
                    .await?;
                info!(
                    repository = scope,
                    fetched = report.fetched,
                    upserted = report.upserted,
                    skipped_pull_requests = report.skipped_pull_requests,
                    "sync page complete"
                );
                Ok(report)
            }
            Err(e) => {
                if let Err(meta_err) = self.db.mark_sync_error(scope, &e.to_string()).await {
                    warn!(repository = scope, error = %meta_err, "failed to record sync error");
                }
                Err(e)
            }
        }
    }

    async fn run_page(
        &self,
        owner: &str,
        name: &str,
        options: &SyncOptions,
        mut on_progress: impl FnMut(SyncProgress),
    ) -> EngineResult<SyncReport> {
        let scope = options.repository.as_str();
        let client = match config_if_registered(&self.db, scope).await? {
            Some(config) => client_for(&self.client, &config)?,
            None => self.client.clone(),
        };

        let list_options = ListIssuesOptions {
            state: options.state,
            sort: options.sort.clone(),
            direction: options.direction.clone(),
            per_page: options.per_page,
            page: options.page,
        };
        let remote = client.list_issues(owner, name, &list_options).await?;

        let fetched = remote.len();
        let mut upserted = 0usize;
        let mut skipped = 0usize;

        for record in remote {
            if record.is_pull_request() {
                skipped += 1;
                continue;
            }
            let mut issue: Issue = record.into_issue(scope);
            issue.search_vector = build_issue_vector(&issue);
            self.db.upsert_issue(&issue).await?;
            upserted += 1;
            on_progress(SyncProgress {
                synced: upserted,
                fetched,
                current_number: issue.number,
            });
        }

        let total_issues = self.db.issue_count(scope).await?;
        Ok(SyncReport {
            repository: scope.to_string(),
            fetched,
            skipped_pull_requests: skipped,
            upserted,
            total_issues,
        })
    }

    /// Sync bookkeeping for one scope.
    pub async fn status(&self, scope: &str) -> EngineResult<Option<SyncMetadata>> {
        Ok(self.db.get_sync_metadata(scope).await?)
    }

    /// Sync bookkeeping for every scope, for the status surface.
    pub async fn status_all(&self) -> EngineResult<Vec<SyncMetadata>> {
        Ok(self.db.all_sync_metadata().await?)
    }

    /// Fetch an issue's comments from the remote service, mirror them
    /// locally, and return them. Comments are only ever fetched this way —
    /// never during bulk sync.
    pub async fn fetch_comments(
        &self,
        repository: &str,
        issue_number: i64,
    ) -> EngineResult<Vec<Comment>> {
        let (owner, name) = split_full_name(repository)?;
        let client = match config_if_registered(&self.db, repository).await? {
            Some(config) => client_for(&self.client, &config)?,
            None => self.client.clone(),
        };

        let remote = client.list_comments(owner, name, issue_number).await?;
        let comments: Vec<Comment> = remote
            .into_iter()
            .map(|c| c.into_comment(repository, issue_number))
            .collect();
        for comment in &comments {
            self.db.upsert_comment(comment).await?;
        }
        Ok(comments)
    }

    /// Create an issue on the remote service and mirror it locally (with a
    /// fresh search vector) so it is immediately searchable.
    pub async fn create_issue(
        &self,
        repository: &str,
        request: &CreateIssueRequest,
    ) -> EngineResult<Issue> {
        let (owner, name) = split_full_name(repository)?;
        let client = match config_if_registered(&self.db, repository).await? {
            Some(config) => client_for(&self.client, &config)?,
            None => self.client.clone(),
        };

        let created = client.create_issue(owner, name, request).await?;
        let mut issue = created.into_issue(repository);
        issue.search_vector = build_issue_vector(&issue);
        self.db.upsert_issue(&issue).await?;
        Ok(issue)
    }

    /// Wipe mirrored issues, comments, cache entries, and sync metadata.
    /// Repository configs survive.
    pub async fn clear_cache(&self) -> EngineResult<()> {
        Ok(self.db.clear_all().await?)
    }
}
