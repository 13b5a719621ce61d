//! Issue rows: upsert from sync, candidate loads for search, id resolution
//! for cache hits.

use std::collections::HashMap;

use issue_scout_types::{Issue, IssueState, Label};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::{Database, DbResult};

use super::{opt_ts_to_datetime, ts_to_datetime};

fn issue_from_row(row: &SqliteRow) -> DbResult<Issue> {
    let labels_json: String = row.try_get("labels")?;
    let labels: Vec<Label> = serde_json::from_str(&labels_json).unwrap_or_default();
    let state: String = row.try_get("state")?;

    Ok(Issue {
        id: row.try_get("id")?,
        number: row.try_get("number")?,
        repository: row.try_get("repository")?,
        title: row.try_get("title")?,
        body: row.try_get("body")?,
        state: IssueState::parse(&state).unwrap_or(IssueState::Open),
        labels,
        author: row.try_get("author")?,
        assignee: row.try_get("assignee")?,
        created_at: ts_to_datetime(row.try_get("created_at")?),
        updated_at: ts_to_datetime(row.try_get("updated_at")?),
        closed_at: opt_ts_to_datetime(row.try_get("closed_at")?),
        comment_count: row.try_get("comment_count")?,
        reactions: row.try_get("reactions")?,
        search_vector: row.try_get("search_vector")?,
    })
}

impl Database {
    /// Insert-or-update an issue by its stable remote identifier.
    ///
    /// Every field including `search_vector` is rewritten, so a changed
    /// title/body/label set can never leave a stale vector behind. Calling
    /// this twice with identical data is a no-op the second time.
    pub async fn upsert_issue(&self, issue: &Issue) -> DbResult<()> {
        let labels = serde_json::to_string(&issue.labels).unwrap_or_else(|_| "[]".into());
        sqlx::query(
            r#"
            INSERT INTO issues (
                id, repository, number, title, body, state, labels,
                author, assignee, created_at, updated_at, closed_at,
                comment_count, reactions, search_vector
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                repository    = excluded.repository,
                number        = excluded.number,
                title         = excluded.title,
                body          = excluded.body,
                state         = excluded.state,
                labels        = excluded.labels,
                author        = excluded.author,
                assignee      = excluded.assignee,
                created_at    = excluded.created_at,
                updated_at    = excluded.updated_at,
                closed_at     = excluded.closed_at,
                comment_count = excluded.comment_count,
                reactions     = excluded.reactions,
                search_vector = excluded.search_vector
            "#,
        )
        .bind(issue.id)
        .bind(&issue.repository)
        .bind(issue.number)
        .bind(&issue.title)
        .bind(&issue.body)
        .bind(issue.state.as_str())
        .bind(labels)
        .bind(&issue.author)
        .bind(&issue.assignee)
        .bind(issue.created_at.timestamp())
        .bind(issue.updated_at.timestamp())
        .bind(issue.closed_at.map(|t| t.timestamp()))
        .bind(issue.comment_count)
        .bind(issue.reactions)
        .bind(&issue.search_vector)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    /// Look up a single issue by repository + sequence number.
    pub async fn get_issue(&self, repository: &str, number: i64) -> DbResult<Option<Issue>> {
        let row = sqlx::query("SELECT * FROM issues WHERE repository = ? AND number = ?")
            .bind(repository)
            .bind(number)
            .fetch_optional(self.pool())
            .await?;
        row.as_ref().map(issue_from_row).transpose()
    }

    /// Candidate load for single-repository search, optionally filtered by
    /// state. Retrieval order is `updated_at DESC, id DESC` — this is the
    /// store's natural order that breaks score ties downstream, so it must
    /// stay stable.
    pub async fn issues_for_repository(
        &self,
        repository: &str,
        state: Option<IssueState>,
    ) -> DbResult<Vec<Issue>> {
        let rows = match state {
            Some(state) => {
                sqlx::query(
                    "SELECT * FROM issues WHERE repository = ? AND state = ? \
                     ORDER BY updated_at DESC, id DESC",
                )
                .bind(repository)
                .bind(state.as_str())
                .fetch_all(self.pool())
                .await?
            }
            None => {
                sqlx::query(
                    "SELECT * FROM issues WHERE repository = ? \
                     ORDER BY updated_at DESC, id DESC",
                )
                .bind(repository)
                .fetch_all(self.pool())
                .await?
            }
        };
        rows.iter().map(issue_from_row).collect()
    }

    /// Resolve cached identifiers, preserving the input order. Identifiers
    /// with no local row are silently dropped — a cache entry may outlive
    /// the rows it points at.
    pub async fn issues_by_ids(&self, ids: &[i64]) -> DbResult<Vec<Issue>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!("SELECT * FROM issues WHERE id IN ({placeholders})");
        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(id);
        }
        let rows = query.fetch_all(self.pool()).await?;

        let mut by_id: HashMap<i64, Issue> = HashMap::with_capacity(rows.len());
        for row in &rows {
            let issue = issue_from_row(row)?;
            by_id.insert(issue.id, issue);
        }

        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    /// Number of issue rows mirrored for a repository.
    pub async fn issue_count(&self, repository: &str) -> DbResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM issues WHERE repository = ?")
            .bind(repository)
            .fetch_one(self.pool())
            .await?;
        Ok(row.0)
    }
}
