//! Wire types for the remote issue tracker's REST and GraphQL payloads.
//!
//! These mirror the remote service's native JSON schema; conversion into the
//! locally-stored [`Issue`]/[`Comment`] shapes happens here so the rest of
//! the system never touches raw API records.

use chrono::{DateTime, Utc};
use issue_scout_types::{Comment, Issue, IssueState, Label};
use serde::{Deserialize, Serialize};

/// State filter accepted by the issue list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateFilter {
    #[default]
    Open,
    Closed,
    All,
}

impl StateFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }
}

/// Query parameters for one page of the issue list endpoint.
///
/// Pagination across multiple pages is the caller's job — repeated calls
/// with an increasing `page`.
#[derive(Debug, Clone)]
pub struct ListIssuesOptions {
    pub state: StateFilter,
    /// `created`, `updated`, or `comments`.
    pub sort: String,
    /// `asc` or `desc`.
    pub direction: String,
    pub per_page: u32,
    pub page: u32,
}

impl Default for ListIssuesOptions {
    fn default() -> Self {
        Self {
            state: StateFilter::Open,
            sort: "updated".into(),
            direction: "desc".into(),
            per_page: 100,
            page: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteUser {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteLabel {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteReactions {
    #[serde(default)]
    pub total_count: i64,
}

/// One record from the issue list endpoint. The endpoint interleaves pull
/// requests with issues; `pull_request` is present exactly when the record
/// is actually a pull request.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteIssue {
    pub id: i64,
    pub number: i64,
    pub title: String,
    pub body: Option<String>,
    pub state: String,
    #[serde(default)]
    pub labels: Vec<RemoteLabel>,
    pub user: Option<RemoteUser>,
    pub assignee: Option<RemoteUser>,
    #[serde(default)]
    pub comments: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reactions: Option<RemoteReactions>,
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl RemoteIssue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    /// Convert into the locally-stored shape. `search_vector` is left empty —
    /// the sync engine rebuilds it at upsert time from the converted fields.
    pub fn into_issue(self, repository: &str) -> Issue {
        Issue {
            id: self.id,
            number: self.number,
            repository: repository.to_string(),
            title: self.title,
            body: self.body.unwrap_or_default(),
            state: IssueState::parse(&self.state).unwrap_or(IssueState::Open),
            labels: self
                .labels
                .into_iter()
                .map(|l| Label {
                    name: l.name,
                    color: l.color.unwrap_or_default(),
                })
                .collect(),
            author: self.user.map(|u| u.login),
            assignee: self.assignee.map(|u| u.login),
            created_at: self.created_at,
            updated_at: self.updated_at,
            closed_at: self.closed_at,
            comment_count: self.comments,
            reactions: self.reactions.unwrap_or_default().total_count,
            search_vector: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteComment {
    pub id: i64,
    pub body: Option<String>,
    pub user: Option<RemoteUser>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RemoteComment {
    pub fn into_comment(self, repository: &str, issue_number: i64) -> Comment {
        Comment {
            id: self.id,
            repository: repository.to_string(),
            issue_number,
            body: self.body.unwrap_or_default(),
            author: self.user.map(|u| u.login),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Body for the create-issue endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CreateIssueRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

/// Error payload shape the REST API returns on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: Option<String>,
}
