// crates/server/src/routes/discussions.rs
//! Discussions pass-through: fetched from the remote GraphQL API, returned
//! as-is, never scored or cached.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use issue_scout_github::Discussion;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct DiscussionsQuery {
    /// Target repository as `owner/name`. Required.
    pub repo: Option<String>,
    /// Maximum threads to collect (default 20, capped at 100).
    pub limit: Option<u32>,
}

/// GET /api/discussions — collect a repository's discussion threads.
pub async fn list_discussions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DiscussionsQuery>,
) -> ApiResult<Json<Vec<Discussion>>> {
    let repo = query
        .repo
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| ApiError::BadRequest("query parameter 'repo' is required".to_string()))?;

    let (owner, name) = repo.split_once('/').ok_or_else(|| {
        ApiError::BadRequest(format!("malformed repository {repo:?} (expected owner/name)"))
    })?;

    let limit = query.limit.unwrap_or(20).min(100);
    let discussions = state
        .github
        .list_discussions(owner, name, limit)
        .await
        .map_err(issue_scout_engine::EngineError::from)?;
    Ok(Json(discussions))
}

/// Create the discussions routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/discussions", get(list_discussions))
}
