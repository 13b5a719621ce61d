// crates/db/src/lib.rs
// SQLite local store for the issue-search engine
#![allow(clippy::too_many_arguments)]

mod migrations;
mod queries;

pub use queries::cache::DEFAULT_CACHE_TTL_SECS;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Failed to determine cache directory")]
    NoCacheDir,

    #[error("Failed to create database directory: {0}")]
    CreateDir(#[from] std::io::Error),
}

pub type DbResult<T> = Result<T, DbError>;

/// Main database handle wrapping a SQLite connection pool.
///
/// This store exclusively owns all persisted rows. Writers are disciplined
/// by convention at the crate seams above: the sync engine writes issues,
/// comments, and sync metadata; the search path writes cache entries;
/// repository configs mutate only through the explicit upsert operation.
/// All writes are upserts keyed by stable identifiers, so concurrent
/// sync + search needs no extra locking.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    db_path: PathBuf,
}

impl Database {
    /// Open (or create) the database at the given path and run migrations.
    pub async fn new(path: &Path) -> DbResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(30));

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await?;

        let db = Self {
            pool,
            db_path: path.to_owned(),
        };
        db.run_migrations().await?;

        info!("Database opened at {}", path.display());
        Ok(db)
    }

    /// Create an in-memory database (for testing).
    ///
    /// Uses `shared_cache(true)` so all pool connections share the same
    /// in-memory database; without it each connection gets its own empty
    /// database and concurrent queries break.
    pub async fn new_in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?
            .shared_cache(true)
            .busy_timeout(std::time::Duration::from_secs(5));
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await?;
        let db = Self {
            pool,
            db_path: PathBuf::new(),
        };
        db.run_migrations().await?;
        Ok(db)
    }

    /// Open the database at the default location:
    /// `<cache_dir>/issue-scout/issue-scout.db`.
    pub async fn open_default() -> DbResult<Self> {
        let path = default_db_path()?;
        Self::new(&path).await
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run all inline migrations, tracked in a `_migrations` table so
    /// non-idempotent statements only execute once.
    async fn run_migrations(&self) -> DbResult<()> {
        sqlx::query("CREATE TABLE IF NOT EXISTS _migrations (version INTEGER PRIMARY KEY)")
            .execute(&self.pool)
            .await?;

        let row: (i64,) = sqlx::query_as("SELECT COALESCE(MAX(version), 0) FROM _migrations")
            .fetch_one(&self.pool)
            .await?;
        let current_version = row.0 as usize;

        for (i, migration) in migrations::MIGRATIONS.iter().enumerate() {
            let version = i + 1; // 1-based
            if version > current_version {
                sqlx::query(migration).execute(&self.pool).await?;
                sqlx::query("INSERT INTO _migrations (version) VALUES (?)")
                    .bind(version as i64)
                    .execute(&self.pool)
                    .await?;
            }
        }

        Ok(())
    }

    /// Wipe all mirrored and derived data: issues, comments, cache entries,
    /// and sync metadata. Repository configs survive — they are caller
    /// configuration, not cached state.
    pub async fn clear_all(&self) -> DbResult<()> {
        sqlx::query("DELETE FROM issues").execute(&self.pool).await?;
        sqlx::query("DELETE FROM comments").execute(&self.pool).await?;
        sqlx::query("DELETE FROM search_cache")
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM sync_metadata")
            .execute(&self.pool)
            .await?;
        info!("Cleared issues, comments, search cache, and sync metadata");
        Ok(())
    }
}

/// Default database path under the platform cache directory.
pub fn default_db_path() -> DbResult<PathBuf> {
    let cache_dir = dirs::cache_dir().ok_or(DbError::NoCacheDir)?;
    Ok(cache_dir.join("issue-scout").join("issue-scout.db"))
}
