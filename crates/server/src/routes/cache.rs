// crates/server/src/routes/cache.rs
//! Cache administration: the "reset" action behind ingestion/admin screens.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;
use ts_rs::TS;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct ClearCacheResponse {
    pub message: String,
}

/// POST /api/cache/clear — wipe mirrored issues, comments, cache entries,
/// and sync metadata. Repository configs survive.
pub async fn clear_cache(State(state): State<Arc<AppState>>) -> ApiResult<Json<ClearCacheResponse>> {
    state.sync.clear_cache().await?;
    tracing::info!("cache cleared via API");
    Ok(Json(ClearCacheResponse {
        message: "Cleared issues, comments, search cache, and sync metadata".to_string(),
    }))
}

/// Create the cache routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/cache/clear", post(clear_cache))
}
