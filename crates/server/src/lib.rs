// crates/server/src/lib.rs
//! Issue-scout server library.
//!
//! Axum-based HTTP surface over the issue-search engine: search and
//! multi-repository search, sync trigger/status, repository config CRUD,
//! the remote pass-throughs, and cache administration.

pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use routes::api_routes;
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the Axum application with all routes and middleware.
///
/// Sets up the API routes, permissive CORS for the local web frontend, and
/// request tracing.
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api_routes(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
