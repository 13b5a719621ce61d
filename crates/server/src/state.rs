// crates/server/src/state.rs
//! Application state for the Axum server.

use std::sync::Arc;
use std::time::Instant;

use issue_scout_db::Database;
use issue_scout_engine::{CrossRepoSearch, RepoSearch, SyncEngine};
use issue_scout_github::GitHubClient;

/// Shared application state accessible from all route handlers.
///
/// The engine services are constructor-injected over one shared [`Database`]
/// handle, so handlers never reach into the store directly.
pub struct AppState {
    /// Server start time for uptime tracking.
    pub start_time: Instant,
    /// Database handle for repository-config and status queries.
    pub db: Database,
    /// Remote client shared by the sync engine's pass-throughs.
    pub github: GitHubClient,
    /// Bulk sync + remote pass-throughs (issue create, comment fetch).
    pub sync: SyncEngine,
    /// Single-repository search.
    pub search: RepoSearch,
    /// Multi-repository fan-out search.
    pub cross: CrossRepoSearch,
}

impl AppState {
    /// Create a new application state wrapped in an Arc for sharing.
    pub fn new(db: Database, github: GitHubClient) -> Arc<Self> {
        Arc::new(Self {
            start_time: Instant::now(),
            sync: SyncEngine::new(db.clone(), github.clone()),
            search: RepoSearch::new(db.clone()),
            cross: CrossRepoSearch::new(db.clone()),
            github,
            db,
        })
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
