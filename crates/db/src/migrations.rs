/// Inline SQL migrations for the issue-scout database schema.
///
/// Simple inline migrations rather than sqlx migration files — the schema is
/// small and self-contained. Append only; never edit an applied entry.
pub const MIGRATIONS: &[&str] = &[
    // Migration 1: issues table (mirrored remote records)
    r#"
CREATE TABLE IF NOT EXISTS issues (
    id            INTEGER PRIMARY KEY,
    repository    TEXT NOT NULL,
    number        INTEGER NOT NULL,
    title         TEXT NOT NULL,
    body          TEXT NOT NULL DEFAULT '',
    state         TEXT NOT NULL DEFAULT 'open',
    labels        TEXT NOT NULL DEFAULT '[]',
    author        TEXT,
    assignee      TEXT,
    created_at    INTEGER NOT NULL DEFAULT 0,
    updated_at    INTEGER NOT NULL DEFAULT 0,
    closed_at     INTEGER,
    comment_count INTEGER NOT NULL DEFAULT 0,
    reactions     INTEGER NOT NULL DEFAULT 0,
    search_vector TEXT NOT NULL DEFAULT ''
);
"#,
    // Migration 2: issues indexes
    r#"CREATE UNIQUE INDEX IF NOT EXISTS idx_issues_repo_number ON issues(repository, number);"#,
    r#"CREATE INDEX IF NOT EXISTS idx_issues_repo_state ON issues(repository, state);"#,
    r#"CREATE INDEX IF NOT EXISTS idx_issues_updated ON issues(updated_at DESC);"#,
    // Migration 3: comments table (lazily fetched replies)
    r#"
CREATE TABLE IF NOT EXISTS comments (
    id           INTEGER PRIMARY KEY,
    repository   TEXT NOT NULL,
    issue_number INTEGER NOT NULL,
    body         TEXT NOT NULL DEFAULT '',
    author       TEXT,
    created_at   INTEGER NOT NULL DEFAULT 0,
    updated_at   INTEGER NOT NULL DEFAULT 0
);
"#,
    r#"CREATE INDEX IF NOT EXISTS idx_comments_issue ON comments(repository, issue_number);"#,
    // Migration 4: repository configs (search targets)
    r#"
CREATE TABLE IF NOT EXISTS repositories (
    full_name TEXT PRIMARY KEY,
    owner     TEXT NOT NULL,
    name      TEXT NOT NULL,
    token     TEXT,
    priority  INTEGER NOT NULL DEFAULT 0,
    enabled   INTEGER NOT NULL DEFAULT 1,
    added_at  INTEGER NOT NULL DEFAULT 0
);
"#,
    // Migration 5: search cache (exact-match query -> ordered id list)
    r#"
CREATE TABLE IF NOT EXISTS search_cache (
    repository TEXT NOT NULL,
    query      TEXT NOT NULL,
    issue_ids  TEXT NOT NULL DEFAULT '[]',
    created_at INTEGER NOT NULL DEFAULT 0,
    expires_at INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (repository, query)
);
"#,
    r#"CREATE INDEX IF NOT EXISTS idx_search_cache_expiry ON search_cache(expires_at);"#,
    // Migration 6: sync metadata (one row per sync scope)
    r#"
CREATE TABLE IF NOT EXISTS sync_metadata (
    scope          TEXT PRIMARY KEY,
    status         TEXT NOT NULL DEFAULT 'idle',
    last_synced_at INTEGER,
    total_issues   INTEGER NOT NULL DEFAULT 0,
    total_comments INTEGER NOT NULL DEFAULT 0,
    error          TEXT
);
"#,
];
