use issue_scout_types::Issue;
use serde::Serialize;
use ts_rs::TS;

/// An issue paired with its per-query relevance score.
///
/// The score lives here, not on `Issue`, so a stale score can never be
/// persisted or carried between queries.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct ScoredIssue {
    #[serde(flatten)]
    pub issue: Issue,
    /// Relevance in [0, 1], already clamped.
    pub score: f64,
}

/// Which field produced the strongest match for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    Title,
    Body,
    Labels,
}

impl MatchField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Body => "body",
            Self::Labels => "labels",
        }
    }
}
