//! API route handlers for the issue-scout server.

pub mod cache;
pub mod discussions;
pub mod health;
pub mod issues;
pub mod repositories;
pub mod search;
pub mod sync;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Create the combined API router with all routes under the /api prefix.
///
/// Routes:
/// - GET  /api/health - Health check
/// - GET  /api/search - Single-repository search
/// - GET  /api/search/all - Multi-repository fan-out search
/// - POST /api/search/message - Keyword-driven search from chat text
/// - POST /api/sync - Trigger one background sync page
/// - GET  /api/sync/status - All sync bookkeeping rows
/// - GET  /api/repositories - List configured search targets
/// - POST /api/repositories - Add or update a search target
/// - POST /api/issues - Create an issue (pass-through + local mirror)
/// - GET  /api/issues/{owner}/{name}/{number}/comments - Lazy comment fetch
/// - GET  /api/discussions - Discussions pass-through
/// - POST /api/cache/clear - Wipe mirrored and derived data
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", health::router())
        .nest("/api", search::router())
        .nest("/api", sync::router())
        .nest("/api", repositories::router())
        .nest("/api", issues::router())
        .nest("/api", discussions::router())
        .nest("/api", cache::router())
        .with_state(state)
}
