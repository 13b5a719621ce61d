// crates/server/src/routes/repositories.rs
//! Repository config endpoints: the only mutation path for search targets.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use issue_scout_types::RepositoryConfig;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpsertRepositoryRequest {
    pub owner: String,
    pub name: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub priority: i64,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// GET /api/repositories — all configured search targets, highest priority
/// first. Tokens are never echoed back.
pub async fn list_repositories(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<RepositoryConfig>>> {
    let mut configs = state.db.list_repositories().await?;
    for config in &mut configs {
        config.token = None;
    }
    Ok(Json(configs))
}

/// POST /api/repositories — add or update a search target.
pub async fn upsert_repository(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpsertRepositoryRequest>,
) -> ApiResult<Json<RepositoryConfig>> {
    let owner = request.owner.trim();
    let name = request.name.trim();
    if owner.is_empty() || name.is_empty() || owner.contains('/') || name.contains('/') {
        return Err(ApiError::BadRequest(
            "owner and name must be non-empty and must not contain '/'".to_string(),
        ));
    }

    // Preserve the original added_at on updates.
    let full_name = format!("{owner}/{name}");
    let added_at = match state.db.get_repository(&full_name).await? {
        Some(existing) => existing.added_at,
        None => Utc::now(),
    };

    let config = RepositoryConfig {
        owner: owner.to_string(),
        name: name.to_string(),
        token: request.token,
        priority: request.priority,
        enabled: request.enabled,
        added_at,
    };
    state.db.upsert_repository(&config).await?;

    tracing::info!(repository = %full_name, enabled = config.enabled, priority = config.priority, "repository config upserted");

    let mut echoed = config;
    echoed.token = None;
    Ok(Json(echoed))
}

/// Create the repositories routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/repositories", get(list_repositories).post(upsert_repository))
}
