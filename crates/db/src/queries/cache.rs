//! Search-result cache: exact query string → ordered issue-id list with
//! expiry.
//!
//! Keys are exact-match on the literal query string, scoped per repository.
//! No partial or fuzzy lookups. An expired entry is a miss, never served.
//! Callers treat any storage error here as a miss too — the cache is an
//! optimization, not a correctness dependency — so these functions report
//! errors but nothing above them should propagate one.

use chrono::{DateTime, Utc};
use sqlx::Row;

use crate::{Database, DbResult};

/// Default entry lifetime: 30 minutes.
pub const DEFAULT_CACHE_TTL_SECS: i64 = 30 * 60;

impl Database {
    /// Cached identifier list for an exact query, if present and unexpired.
    ///
    /// `now` is injected so expiry is testable without sleeping.
    pub async fn cache_get(
        &self,
        repository: &str,
        query: &str,
        now: DateTime<Utc>,
    ) -> DbResult<Option<Vec<i64>>> {
        let row = sqlx::query(
            "SELECT issue_ids FROM search_cache \
             WHERE repository = ? AND query = ? AND expires_at > ?",
        )
        .bind(repository)
        .bind(query)
        .bind(now.timestamp())
        .fetch_optional(self.pool())
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let ids_json: String = row.try_get("issue_ids")?;
        Ok(Some(serde_json::from_str(&ids_json).unwrap_or_default()))
    }

    /// Overwrite the entry for this exact query with a fresh expiry of
    /// `now + ttl_secs`.
    pub async fn cache_put(
        &self,
        repository: &str,
        query: &str,
        ids: &[i64],
        ttl_secs: i64,
        now: DateTime<Utc>,
    ) -> DbResult<()> {
        let ids_json = serde_json::to_string(ids).unwrap_or_else(|_| "[]".into());
        sqlx::query(
            r#"
            INSERT INTO search_cache (repository, query, issue_ids, created_at, expires_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(repository, query) DO UPDATE SET
                issue_ids  = excluded.issue_ids,
                created_at = excluded.created_at,
                expires_at = excluded.expires_at
            "#,
        )
        .bind(repository)
        .bind(query)
        .bind(ids_json)
        .bind(now.timestamp())
        .bind(now.timestamp() + ttl_secs)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    /// Drop entries whose expiry has passed. Housekeeping only — `cache_get`
    /// already refuses to serve them.
    pub async fn cache_purge_expired(&self, now: DateTime<Utc>) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM search_cache WHERE expires_at <= ?")
            .bind(now.timestamp())
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected())
    }
}
