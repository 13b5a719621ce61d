// crates/server/src/routes/issues.rs
//! Remote pass-through endpoints: issue creation and lazy comment fetch.
//! Both mirror their results into the local store for future search.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use issue_scout_github::CreateIssueRequest;
use issue_scout_types::Comment;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateIssueBody {
    /// Target repository as `owner/name`.
    pub repository: String,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// POST /api/issues — create an issue on the remote service and mirror it
/// locally so it is immediately searchable.
pub async fn create_issue(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateIssueBody>,
) -> ApiResult<impl IntoResponse> {
    if request.title.trim().is_empty() {
        return Err(ApiError::BadRequest("title must not be empty".to_string()));
    }

    let issue = state
        .sync
        .create_issue(
            &request.repository,
            &CreateIssueRequest {
                title: request.title,
                body: request.body,
                labels: request.labels,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(issue)))
}

/// GET /api/issues/{owner}/{name}/{number}/comments — fetch an issue's
/// comments from the remote service, mirror them, and return them.
pub async fn issue_comments(
    State(state): State<Arc<AppState>>,
    Path((owner, name, number)): Path<(String, String, i64)>,
) -> ApiResult<Json<Vec<Comment>>> {
    let repository = format!("{owner}/{name}");
    let comments = state.sync.fetch_comments(&repository, number).await?;
    Ok(Json(comments))
}

/// Create the issues routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/issues", post(create_issue))
        .route("/issues/{owner}/{name}/{number}/comments", get(issue_comments))
}
