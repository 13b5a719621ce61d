// crates/types/src/lib.rs
//! Shared domain types for the issue-search engine.
//!
//! These are the records mirrored from the remote issue tracker plus the
//! configuration and bookkeeping rows that live in the local store. API
//! response shapes stay in the crates that produce them; only types shared
//! across crate seams live here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Open/closed state of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

impl IssueState {
    /// Stable string form used in SQLite columns and API query params.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    /// Parse the column/query form. Unknown values map to `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

/// An issue label (name + display color).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
pub struct Label {
    pub name: String,
    /// Hex color without the leading `#`, as the remote API reports it.
    #[serde(default)]
    pub color: String,
}

/// A remote issue record, mirrored locally.
///
/// `search_vector` is rebuilt on every upsert from the current title, body,
/// and label names — a stored vector is never older than the text it was
/// derived from. Per-query relevance is *not* a field here: scoring wraps
/// issues in a scored result type so a stale score cannot be persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Stable remote identifier (unique across repositories).
    pub id: i64,
    /// Per-repository sequence number.
    pub number: i64,
    /// Originating repository, as `owner/name`.
    pub repository: String,
    pub title: String,
    /// Empty string when the remote record has no body.
    #[serde(default)]
    pub body: String,
    pub state: IssueState,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub author: Option<String>,
    pub assignee: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    /// Number of comments on the remote record.
    #[serde(default)]
    pub comment_count: i64,
    /// Reaction/engagement total, used by the weighted scorer's popularity
    /// boost. 0 when the remote API omits it.
    #[serde(default)]
    pub reactions: i64,
    /// Normalized token string built at ingestion time (see the search
    /// crate's vector builder).
    #[serde(default)]
    pub search_vector: String,
}

impl Issue {
    /// Label names only, in label order.
    pub fn label_names(&self) -> Vec<&str> {
        self.labels.iter().map(|l| l.name.as_str()).collect()
    }
}

/// A reply on an issue, keyed by the parent issue's sequence number.
/// Fetched lazily (on demand), never during bulk sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub repository: String,
    pub issue_number: i64,
    pub body: String,
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A configured search target.
///
/// Disabled repositories are excluded from both sync and search. `priority`
/// is a tie-break between near-equal relevance scores at the multi-repository
/// layer — it never overrides a materially higher score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct RepositoryConfig {
    pub owner: String,
    pub name: String,
    /// Optional access token for this repository. Absent token limits
    /// requests to unauthenticated rate limits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Higher is preferred when scores tie.
    #[serde(default)]
    pub priority: i64,
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub added_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl RepositoryConfig {
    /// Canonical `owner/name` key used throughout the store.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// Lifecycle state of a sync scope. Transitions are
/// `idle → syncing → (idle | error)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Idle,
    Syncing,
    Error,
}

impl SyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Syncing => "syncing",
            Self::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "idle" => Some(Self::Idle),
            "syncing" => Some(Self::Syncing),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// One bookkeeping record per sync scope (repository full name).
///
/// `total_issues` is the actual row count after the last successful sync,
/// never a cumulative counter. A failed sync keeps previously-synced rows
/// untouched — upserts are idempotent, so retrying is always safe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct SyncMetadata {
    pub scope: String,
    pub status: SyncStatus,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub total_issues: i64,
    pub total_comments: i64,
    pub error: Option<String>,
}
