//! Sync bookkeeping, one row per scope (repository full name).
//!
//! Status transitions are `idle → syncing → (idle | error)`. A failed sync
//! records the message but leaves already-upserted issue rows in place —
//! upserts are idempotent, so the caller just retries.

use chrono::{DateTime, Utc};
use issue_scout_types::{SyncMetadata, SyncStatus};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::{Database, DbResult};

use super::opt_ts_to_datetime;

fn metadata_from_row(row: &SqliteRow) -> DbResult<SyncMetadata> {
    let status: String = row.try_get("status")?;
    Ok(SyncMetadata {
        scope: row.try_get("scope")?,
        status: SyncStatus::parse(&status).unwrap_or(SyncStatus::Idle),
        last_synced_at: opt_ts_to_datetime(row.try_get("last_synced_at")?),
        total_issues: row.try_get("total_issues")?,
        total_comments: row.try_get("total_comments")?,
        error: row.try_get("error")?,
    })
}

impl Database {
    /// Move a scope into `syncing`, clearing any previous error. Counts are
    /// left untouched until completion.
    pub async fn mark_sync_started(&self, scope: &str) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sync_metadata (scope, status, error)
            VALUES (?, 'syncing', NULL)
            ON CONFLICT(scope) DO UPDATE SET status = 'syncing', error = NULL
            "#,
        )
        .bind(scope)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    /// Move a scope back to `idle` with final counts. `total_issues` and
    /// `total_comments` are the actual row counts, not cumulative tallies.
    pub async fn mark_sync_complete(
        &self,
        scope: &str,
        total_issues: i64,
        total_comments: i64,
        at: DateTime<Utc>,
    ) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sync_metadata (scope, status, last_synced_at, total_issues, total_comments, error)
            VALUES (?, 'idle', ?, ?, ?, NULL)
            ON CONFLICT(scope) DO UPDATE SET
                status         = 'idle',
                last_synced_at = excluded.last_synced_at,
                total_issues   = excluded.total_issues,
                total_comments = excluded.total_comments,
                error          = NULL
            "#,
        )
        .bind(scope)
        .bind(at.timestamp())
        .bind(total_issues)
        .bind(total_comments)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    /// Record a failed sync. Previously-synced rows and counts survive.
    pub async fn mark_sync_error(&self, scope: &str, message: &str) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sync_metadata (scope, status, error)
            VALUES (?, 'error', ?)
            ON CONFLICT(scope) DO UPDATE SET status = 'error', error = excluded.error
            "#,
        )
        .bind(scope)
        .bind(message)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    /// Bookkeeping row for one scope.
    pub async fn get_sync_metadata(&self, scope: &str) -> DbResult<Option<SyncMetadata>> {
        let row = sqlx::query("SELECT * FROM sync_metadata WHERE scope = ?")
            .bind(scope)
            .fetch_optional(self.pool())
            .await?;
        row.as_ref().map(metadata_from_row).transpose()
    }

    /// All bookkeeping rows, for the status endpoint.
    pub async fn all_sync_metadata(&self) -> DbResult<Vec<SyncMetadata>> {
        let rows = sqlx::query("SELECT * FROM sync_metadata ORDER BY scope ASC")
            .fetch_all(self.pool())
            .await?;
        rows.iter().map(metadata_from_row).collect()
    }
}
