// crates/server/src/error.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use issue_scout_db::DbError;
use issue_scout_engine::EngineError;
use issue_scout_github::GitHubError;
use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

/// Structured JSON error response for API errors.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// API error types that map to HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = match &self {
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(msg.clone()),
            ),
            ApiError::Conflict(msg) => {
                (StatusCode::CONFLICT, ErrorResponse::new(msg.clone()))
            }
            ApiError::Engine(engine_err) => match engine_err {
                // Caller mistakes: typed configuration failures.
                EngineError::InvalidRepository(repo) => {
                    tracing::warn!(repository = %repo, "malformed repository identifier");
                    (
                        StatusCode::BAD_REQUEST,
                        ErrorResponse::with_details(
                            "Malformed repository identifier",
                            format!("expected owner/name, got {repo:?}"),
                        ),
                    )
                }
                EngineError::UnknownRepository(repo) => {
                    tracing::warn!(repository = %repo, "repository not configured");
                    (
                        StatusCode::NOT_FOUND,
                        ErrorResponse::with_details("Repository not configured", repo.clone()),
                    )
                }
                EngineError::RepositoryDisabled(repo) => {
                    tracing::warn!(repository = %repo, "repository disabled");
                    (
                        StatusCode::BAD_REQUEST,
                        ErrorResponse::with_details("Repository is disabled", repo.clone()),
                    )
                }
                // Transient remote failures surface as bad-gateway on the
                // explicit single-target paths that are allowed to fail.
                EngineError::GitHub(GitHubError::RateLimited) => {
                    tracing::warn!("remote API rate limit hit");
                    (
                        StatusCode::TOO_MANY_REQUESTS,
                        ErrorResponse::new("Remote API rate limit exceeded"),
                    )
                }
                EngineError::GitHub(gh_err) => {
                    tracing::error!(error = %gh_err, "remote API error");
                    (
                        StatusCode::BAD_GATEWAY,
                        ErrorResponse::with_details("Remote API error", gh_err.to_string()),
                    )
                }
                EngineError::Db(db_err) => {
                    tracing::error!(error = %db_err, "database error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorResponse::new("Internal storage error"),
                    )
                }
            },
            ApiError::Database(db_err) => {
                tracing::error!(error = %db_err, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Internal storage error"),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
