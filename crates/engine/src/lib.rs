// crates/engine/src/lib.rs
//! The issue-search engine: sync, single-repository search, and the
//! multi-repository coordinator.
//!
//! Each concern is its own constructor-injected service struct over a shared
//! [`Database`] handle, so every piece is independently testable against an
//! in-memory store:
//!
//! - [`SyncEngine`] — pulls pages from the remote tracker into the store,
//!   plus the remote pass-throughs (issue create, lazy comment fetch). The
//!   only writer of issue/comment/sync-metadata rows.
//! - [`RepoSearch`] — cache-aware search within one configured repository.
//! - [`CrossRepoSearch`] — concurrent fan-out across repositories with
//!   partial-failure tolerance and deterministic merge ordering.

pub mod multi;
pub mod search;
pub mod sync;

pub use multi::{CrossRepoHit, CrossRepoSearch, MultiSearchOptions};
pub use search::{RepoSearch, SearchOptions};
pub use sync::{SyncEngine, SyncOptions, SyncProgress, SyncReport};

use issue_scout_db::{Database, DbError};
use issue_scout_github::{GitHubClient, GitHubError};
use issue_scout_types::RepositoryConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Database error: {0}")]
    Db(#[from] DbError),

    #[error("Remote API error: {0}")]
    GitHub(#[from] GitHubError),

    #[error("Malformed repository identifier: {0:?} (expected owner/name)")]
    InvalidRepository(String),

    #[error("Repository not configured: {0}")]
    UnknownRepository(String),

    #[error("Repository is disabled: {0}")]
    RepositoryDisabled(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Split an `owner/name` identifier, rejecting malformed input as a typed
/// configuration error rather than letting it reach the remote API.
pub(crate) fn split_full_name(full_name: &str) -> EngineResult<(&str, &str)> {
    match full_name.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((owner, name))
        }
        _ => Err(EngineError::InvalidRepository(full_name.to_string())),
    }
}

/// Client to use for one repository: the config's own token when present,
/// otherwise the shared default client. The base URL is always inherited so
/// tests (and enterprise deployments) keep their override.
pub(crate) fn client_for(
    default: &GitHubClient,
    config: &RepositoryConfig,
) -> EngineResult<GitHubClient> {
    match &config.token {
        Some(token) => Ok(GitHubClient::new(Some(token.clone()))?
            .with_base_url(default.base_url().to_string())),
        None => Ok(default.clone()),
    }
}

/// Resolve a repository's config when it exists, without enforcing enabled
/// state — pass-through operations work against disabled repositories too.
pub(crate) async fn config_if_registered(
    db: &Database,
    full_name: &str,
) -> EngineResult<Option<RepositoryConfig>> {
    Ok(db.get_repository(full_name).await?)
}
