//! Comment rows. Comments are fetched lazily (per issue, on demand), never
//! during bulk sync, so this module is small.

use issue_scout_types::Comment;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::{Database, DbResult};

use super::ts_to_datetime;

fn comment_from_row(row: &SqliteRow) -> DbResult<Comment> {
    Ok(Comment {
        id: row.try_get("id")?,
        repository: row.try_get("repository")?,
        issue_number: row.try_get("issue_number")?,
        body: row.try_get("body")?,
        author: row.try_get("author")?,
        created_at: ts_to_datetime(row.try_get("created_at")?),
        updated_at: ts_to_datetime(row.try_get("updated_at")?),
    })
}

impl Database {
    /// Insert-or-update a comment by its stable remote identifier.
    pub async fn upsert_comment(&self, comment: &Comment) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, repository, issue_number, body, author, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                repository   = excluded.repository,
                issue_number = excluded.issue_number,
                body         = excluded.body,
                author       = excluded.author,
                created_at   = excluded.created_at,
                updated_at   = excluded.updated_at
            "#,
        )
        .bind(comment.id)
        .bind(&comment.repository)
        .bind(comment.issue_number)
        .bind(&comment.body)
        .bind(&comment.author)
        .bind(comment.created_at.timestamp())
        .bind(comment.updated_at.timestamp())
        .execute(self.pool())
        .await?;
        Ok(())
    }

    /// All stored comments for one issue, oldest first.
    pub async fn comments_for_issue(
        &self,
        repository: &str,
        issue_number: i64,
    ) -> DbResult<Vec<Comment>> {
        let rows = sqlx::query(
            "SELECT * FROM comments WHERE repository = ? AND issue_number = ? \
             ORDER BY created_at ASC, id ASC",
        )
        .bind(repository)
        .bind(issue_number)
        .fetch_all(self.pool())
        .await?;
        rows.iter().map(comment_from_row).collect()
    }

    /// Number of comment rows mirrored for a repository.
    pub async fn comment_count(&self, repository: &str) -> DbResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM comments WHERE repository = ?")
            .bind(repository)
            .fetch_one(self.pool())
            .await?;
        Ok(row.0)
    }
}
