// crates/server/src/routes/sync.rs
//! Sync trigger and status endpoints.
//!
//! - `POST /sync`        — start a background sync page (202), one at a time
//! - `GET  /sync/status` — all sync bookkeeping rows

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use issue_scout_engine::SyncOptions;
use issue_scout_github::StateFilter;
use issue_scout_types::SyncMetadata;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use ts_rs::TS;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Global mutex preventing concurrent syncs; the job itself is spawned and
/// observed through `GET /sync/status`.
static SYNC_MUTEX: std::sync::OnceLock<Mutex<()>> = std::sync::OnceLock::new();

fn sync_mutex() -> &'static Mutex<()> {
    SYNC_MUTEX.get_or_init(|| Mutex::new(()))
}

#[derive(Debug, Deserialize)]
pub struct SyncRequest {
    /// Target repository as `owner/name`.
    pub repository: String,
    /// `open`, `closed`, or `all` (default `open`).
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

/// Response for successful sync initiation.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct SyncAcceptedResponse {
    pub message: String,
    pub status: String,
}

/// POST /api/sync — trigger one background sync page.
///
/// Returns:
/// - 202 Accepted: sync started (none was running)
/// - 409 Conflict: a sync is already in progress
///
/// The sync runs in the background; poll `GET /api/sync/status` for the
/// outcome. Failures land in sync metadata, not in this response.
pub async fn trigger_sync(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SyncRequest>,
) -> ApiResult<Response> {
    let state_filter = match request.state.as_deref() {
        None | Some("open") => StateFilter::Open,
        Some("closed") => StateFilter::Closed,
        Some("all") => StateFilter::All,
        Some(other) => {
            return Err(ApiError::BadRequest(format!(
                "invalid state {other:?} (expected open|closed|all)"
            )))
        }
    };

    let mutex = sync_mutex();
    match mutex.try_lock() {
        Ok(guard) => {
            let mut options = SyncOptions::for_repository(request.repository.clone());
            options.state = state_filter;
            if let Some(page) = request.page {
                options.page = page.max(1);
            }
            if let Some(per_page) = request.per_page {
                options.per_page = per_page.clamp(1, 100);
            }

            let sync = state.sync.clone();
            tokio::spawn(async move {
                // Hold the mutex guard for the entire duration of the sync.
                let _guard = guard;

                tracing::info!(repository = %options.repository, page = options.page, "sync triggered via API");
                match sync.sync(&options).await {
                    Ok(report) => {
                        tracing::info!(
                            repository = %report.repository,
                            fetched = report.fetched,
                            upserted = report.upserted,
                            total_issues = report.total_issues,
                            "sync complete"
                        );
                    }
                    Err(e) => {
                        // Already recorded in sync metadata; log for the operator.
                        tracing::error!(repository = %options.repository, error = %e, "sync failed");
                    }
                }
            });

            let response = SyncAcceptedResponse {
                message: format!("Sync initiated for {}", request.repository),
                status: "accepted".to_string(),
            };
            Ok((StatusCode::ACCEPTED, Json(response)).into_response())
        }
        Err(_) => Err(ApiError::Conflict(
            "A sync is already in progress. Please wait for it to complete.".to_string(),
        )),
    }
}

/// GET /api/sync/status — all sync bookkeeping rows.
pub async fn sync_status(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<SyncMetadata>>> {
    Ok(Json(state.sync.status_all().await?))
}

/// Create the sync routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sync", post(trigger_sync))
        .route("/sync/status", get(sync_status))
}
