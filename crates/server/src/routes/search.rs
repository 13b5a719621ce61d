// crates/server/src/routes/search.rs
//! Search endpoints.
//!
//! - `GET  /search`         — single-repository search
//! - `GET  /search/all`     — multi-repository fan-out search
//! - `POST /search/message` — keyword-driven search from chat text

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use issue_scout_engine::{CrossRepoHit, MultiSearchOptions, SearchOptions};
use issue_scout_search::ScoredIssue;
use issue_scout_types::IssueState;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const MAX_LIMIT: usize = 100;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct SearchQuery {
    /// Target repository as `owner/name`. Required.
    pub repo: Option<String>,
    /// The search query string. Required.
    pub q: Option<String>,
    /// Maximum results (default 20, capped at 100).
    pub limit: Option<usize>,
    /// `open` or `closed`; absent searches both.
    pub state: Option<String>,
    pub min_relevance: Option<f64>,
    /// Set to `false` to bypass the cache.
    pub cache: Option<bool>,
}

/// Response for the single-repository search endpoint.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub query: String,
    pub repository: String,
    pub total: usize,
    pub elapsed_ms: f64,
    pub results: Vec<ScoredIssue>,
}

/// GET /api/search — search one configured repository.
///
/// This is the one search path allowed to fail: an unknown or disabled
/// repository is the caller's mistake and comes back as a 4xx.
async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<SearchResponse>> {
    let repo = required(query.repo.as_deref(), "repo")?;
    let q = required(query.q.as_deref(), "q")?;

    let options = SearchOptions {
        limit: query.limit.unwrap_or(20).min(MAX_LIMIT),
        state: parse_state(query.state.as_deref())?,
        min_relevance: query.min_relevance.unwrap_or(0.1),
        use_cache: query.cache.unwrap_or(true),
    };

    let start = Instant::now();
    let results = state.search.search(repo, q, &options).await?;

    Ok(Json(SearchResponse {
        query: q.to_string(),
        repository: repo.to_string(),
        total: results.len(),
        elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        results,
    }))
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct MultiSearchQuery {
    /// The search query string. Required.
    pub q: Option<String>,
    /// Comma-separated explicit repository list; absent means every enabled
    /// config.
    pub repos: Option<String>,
    pub limit: Option<usize>,
    pub state: Option<String>,
    pub min_relevance: Option<f64>,
    /// Set to `false` to blank issue bodies in the payload.
    pub body: Option<bool>,
    /// Set to `true` to attach mirrored comments.
    pub comments: Option<bool>,
}

/// Response for the multi-repository search endpoints.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct MultiSearchResponse {
    pub query: String,
    pub total: usize,
    pub elapsed_ms: f64,
    pub results: Vec<CrossRepoHit>,
}

/// GET /api/search/all — fan out across configured repositories.
///
/// Never fails on individual repository errors; an empty result list is a
/// valid answer.
async fn multi_search_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MultiSearchQuery>,
) -> ApiResult<Json<MultiSearchResponse>> {
    let q = required(query.q.as_deref(), "q")?;

    let repositories = query.repos.as_deref().map(|list| {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect::<Vec<_>>()
    });

    let options = MultiSearchOptions {
        query: q.to_string(),
        repositories,
        state: parse_state(query.state.as_deref())?,
        limit: query.limit.unwrap_or(20).min(MAX_LIMIT),
        min_relevance: query.min_relevance.unwrap_or(0.1),
        include_body: query.body.unwrap_or(true),
        include_comments: query.comments.unwrap_or(false),
    };

    let start = Instant::now();
    let results = state.cross.search_across_repositories(&options).await;

    Ok(Json(MultiSearchResponse {
        query: q.to_string(),
        total: results.len(),
        elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        results,
    }))
}

#[derive(Debug, Deserialize)]
pub struct MessageSearchRequest {
    pub text: String,
}

/// Response for the chat-driven search endpoint; echoes the keywords the
/// extractor derived so the UI can show why these results came back.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct MessageSearchResponse {
    pub keywords: Vec<String>,
    pub total: usize,
    pub results: Vec<CrossRepoHit>,
}

/// POST /api/search/message — derive keywords from chat text and fan out.
async fn message_search_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MessageSearchRequest>,
) -> ApiResult<Json<MessageSearchResponse>> {
    let keywords = issue_scout_search::extract_technical_keywords(&request.text);
    let results = state.cross.search_by_message_content(&request.text).await;

    Ok(Json(MessageSearchResponse {
        keywords,
        total: results.len(),
        results,
    }))
}

fn required<'a>(value: Option<&'a str>, name: &str) -> ApiResult<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::BadRequest(format!(
            "query parameter '{name}' is required"
        ))),
    }
}

fn parse_state(state: Option<&str>) -> ApiResult<Option<IssueState>> {
    match state {
        None | Some("") | Some("all") => Ok(None),
        Some(s) => IssueState::parse(s).map(Some).ok_or_else(|| {
            ApiError::BadRequest(format!("invalid state {s:?} (expected open|closed|all)"))
        }),
    }
}

/// Build the search sub-router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/search", get(search_handler))
        .route("/search/all", get(multi_search_handler))
        .route("/search/message", post(message_search_handler))
}
