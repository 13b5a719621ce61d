// crates/server/src/main.rs
//! Issue-scout server binary.
//!
//! Opens (or creates) the SQLite store, builds the engine services, and
//! serves the HTTP API. Sync runs only on demand via `POST /api/sync` —
//! there is no startup crawl.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use issue_scout_db::Database;
use issue_scout_github::GitHubClient;
use issue_scout_server::{create_app, AppState};
use tracing_subscriber::EnvFilter;

/// Default port for the server.
const DEFAULT_PORT: u16 = 48150;

#[derive(Debug, Parser)]
#[command(name = "issue-scout", version, about = "Issue search and caching engine")]
struct Args {
    /// Port to listen on.
    #[arg(long, env = "ISSUE_SCOUT_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Database path. Defaults to the platform cache directory.
    #[arg(long, env = "ISSUE_SCOUT_DB")]
    db: Option<PathBuf>,

    /// Default access token for the remote issue tracker. Per-repository
    /// tokens in the config take precedence. Absent token limits requests
    /// to unauthenticated rate limits.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let db = match &args.db {
        Some(path) => Database::new(path).await?,
        None => Database::open_default().await?,
    };

    let github = GitHubClient::new(args.token.clone())?;
    if args.token.is_none() {
        tracing::warn!("no access token configured; remote requests use unauthenticated rate limits");
    }

    let state = AppState::new(db, github);
    let app = create_app(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("issue-scout listening on http://{addr}");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
