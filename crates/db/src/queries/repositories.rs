//! Repository config rows. These are caller configuration, mutated only
//! through the explicit upsert — `clear_all` leaves them alone.

use issue_scout_types::RepositoryConfig;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::{Database, DbResult};

use super::ts_to_datetime;

fn config_from_row(row: &SqliteRow) -> DbResult<RepositoryConfig> {
    Ok(RepositoryConfig {
        owner: row.try_get("owner")?,
        name: row.try_get("name")?,
        token: row.try_get("token")?,
        priority: row.try_get("priority")?,
        enabled: row.try_get::<i64, _>("enabled")? != 0,
        added_at: ts_to_datetime(row.try_get("added_at")?),
    })
}

impl Database {
    /// Add or update a configured search target, keyed by `owner/name`.
    pub async fn upsert_repository(&self, config: &RepositoryConfig) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO repositories (full_name, owner, name, token, priority, enabled, added_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(full_name) DO UPDATE SET
                owner    = excluded.owner,
                name     = excluded.name,
                token    = excluded.token,
                priority = excluded.priority,
                enabled  = excluded.enabled
            "#,
        )
        .bind(config.full_name())
        .bind(&config.owner)
        .bind(&config.name)
        .bind(&config.token)
        .bind(config.priority)
        .bind(i64::from(config.enabled))
        .bind(config.added_at.timestamp())
        .execute(self.pool())
        .await?;
        Ok(())
    }

    /// All configured repositories, highest priority first.
    pub async fn list_repositories(&self) -> DbResult<Vec<RepositoryConfig>> {
        let rows =
            sqlx::query("SELECT * FROM repositories ORDER BY priority DESC, full_name ASC")
                .fetch_all(self.pool())
                .await?;
        rows.iter().map(config_from_row).collect()
    }

    /// Only the enabled repositories — the default multi-search target set.
    pub async fn enabled_repositories(&self) -> DbResult<Vec<RepositoryConfig>> {
        let rows = sqlx::query(
            "SELECT * FROM repositories WHERE enabled = 1 ORDER BY priority DESC, full_name ASC",
        )
        .fetch_all(self.pool())
        .await?;
        rows.iter().map(config_from_row).collect()
    }

    /// Look up one config by its `owner/name` key.
    pub async fn get_repository(&self, full_name: &str) -> DbResult<Option<RepositoryConfig>> {
        let row = sqlx::query("SELECT * FROM repositories WHERE full_name = ?")
            .bind(full_name)
            .fetch_optional(self.pool())
            .await?;
        row.as_ref().map(config_from_row).transpose()
    }
}
