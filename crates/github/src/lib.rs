//! REST client for the remote issue tracker.
//!
//! One thin, typed client per concern the engine needs: paginated issue
//! lists for sync, per-issue comment lists (lazy fetch), issue creation
//! (pass-through), and the GraphQL discussions collector. No retry logic
//! here — transient failures surface as [`GitHubError`] and the layers
//! above decide whether to retry (sync) or degrade (multi-repo search).

pub mod discussions;
pub mod types;

pub use discussions::Discussion;
pub use types::{CreateIssueRequest, ListIssuesOptions, RemoteComment, RemoteIssue, StateFilter};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

use types::ApiErrorBody;

const DEFAULT_API_URL: &str = "https://api.github.com";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    #[error("Rate limited by the remote API")]
    RateLimited,

    #[error("GraphQL error: {0}")]
    GraphQl(String),
}

/// Client for the remote issue-tracking service.
///
/// Cheap to clone (the inner `reqwest::Client` is an `Arc`). An absent token
/// limits requests to unauthenticated rate limits but is otherwise fine.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(token: Option<String>) -> Result<Self, GitHubError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("issue-scout"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: DEFAULT_API_URL.to_string(),
            token,
        })
    }

    /// Point the client at a different API root (tests, GitHub Enterprise).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.header(AUTHORIZATION, format!("Bearer {token}")),
            None => req,
        }
    }

    /// Fetch one page of issues. The response may interleave pull requests;
    /// callers filter with [`RemoteIssue::is_pull_request`].
    pub async fn list_issues(
        &self,
        owner: &str,
        name: &str,
        options: &ListIssuesOptions,
    ) -> Result<Vec<RemoteIssue>, GitHubError> {
        let url = format!(
            "{}/repos/{}/{}/issues",
            self.base_url,
            urlencoding::encode(owner),
            urlencoding::encode(name)
        );
        let response = self
            .auth(self.http.get(&url))
            .query(&[
                ("state", options.state.as_str()),
                ("sort", options.sort.as_str()),
                ("direction", options.direction.as_str()),
                ("per_page", &options.per_page.to_string()),
                ("page", &options.page.to_string()),
            ])
            .send()
            .await?;

        let response = check_status(response).await?;
        let issues: Vec<RemoteIssue> = response.json().await?;
        debug!(owner, name, page = options.page, count = issues.len(), "fetched issue page");
        Ok(issues)
    }

    /// Fetch one issue's comments (a single page of up to 100 — deeper
    /// threads are out of scope for the lazy fetch).
    pub async fn list_comments(
        &self,
        owner: &str,
        name: &str,
        issue_number: i64,
    ) -> Result<Vec<RemoteComment>, GitHubError> {
        let url = format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.base_url,
            urlencoding::encode(owner),
            urlencoding::encode(name),
            issue_number
        );
        let response = self
            .auth(self.http.get(&url))
            .query(&[("per_page", "100")])
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Create an issue on the remote service and return the created record.
    pub async fn create_issue(
        &self,
        owner: &str,
        name: &str,
        request: &CreateIssueRequest,
    ) -> Result<RemoteIssue, GitHubError> {
        let url = format!(
            "{}/repos/{}/{}/issues",
            self.base_url,
            urlencoding::encode(owner),
            urlencoding::encode(name)
        );
        let response = self.auth(self.http.post(&url)).json(request).send().await?;

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post_graphql<T: serde::Serialize>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<reqwest::Response, GitHubError> {
        let response = self.auth(self.http.post(url)).json(body).send().await?;
        check_status(response).await
    }
}

/// Map non-2xx responses to typed errors. 403/429 with an exhausted
/// rate-limit header becomes [`GitHubError::RateLimited`] so callers can
/// distinguish backoff from genuine failures.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, GitHubError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let exhausted = response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "0");
    if status == StatusCode::TOO_MANY_REQUESTS || (status == StatusCode::FORBIDDEN && exhausted) {
        return Err(GitHubError::RateLimited);
    }

    let message = response
        .json::<ApiErrorBody>()
        .await
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| status.to_string());
    Err(GitHubError::Api { status, message })
}
