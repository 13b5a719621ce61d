//! Multi-repository coordinator: concurrent fan-out, weighted re-scoring,
//! deterministic merge.
//!
//! This is the only place the engine introduces real concurrency — one
//! independent search per target repository, all awaited before merging.
//! The merge is deterministic given identical per-repository result sets;
//! completion order never leaks into the output. The coordinator never
//! fails as a whole: a repository that errors is logged and contributes
//! zero results.

use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use issue_scout_db::Database;
use issue_scout_search::{
    extract_snippet, extract_technical_keywords, rank_by_score_and_priority,
    score_issue_weighted, MatchField,
};
use issue_scout_types::{Comment, Issue, IssueState, RepositoryConfig};
use serde::Serialize;
use tracing::{debug, warn};
use ts_rs::TS;

use crate::search::{RepoSearch, SearchOptions};

/// Per-repository thresholds are lowered by this factor so under-filtering
/// at the source never starves the global ranking.
const PER_REPO_RELEVANCE_FACTOR: f64 = 0.8;

/// Knobs for one fan-out call.
#[derive(Debug, Clone)]
pub struct MultiSearchOptions {
    pub query: String,
    /// Explicit target set; `None` means every enabled repository config.
    pub repositories: Option<Vec<String>>,
    pub state: Option<IssueState>,
    pub limit: usize,
    pub min_relevance: f64,
    /// When false, hit bodies are blanked in the response payload (they
    /// still participate in scoring).
    pub include_body: bool,
    /// Attach locally-mirrored comments to each hit.
    pub include_comments: bool,
}

impl Default for MultiSearchOptions {
    fn default() -> Self {
        Self {
            query: String::new(),
            repositories: None,
            state: None,
            limit: 20,
            min_relevance: 0.1,
            include_body: true,
            include_comments: false,
        }
    }
}

/// One merged result: the issue plus where it came from and why it matched.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../../../web/src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct CrossRepoHit {
    #[serde(flatten)]
    pub issue: Issue,
    /// Weighted relevance, clamped to [0, 1].
    pub score: f64,
    /// Priority of the originating repository (merge tie-break input).
    pub priority: i64,
    pub matched_field: Option<MatchField>,
    /// Context around the first matched token in the matched field.
    pub snippet: Option<String>,
    /// Mirrored comments, when requested.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

/// Concurrent fan-out across configured repositories.
#[derive(Debug, Clone)]
pub struct CrossRepoSearch {
    db: Database,
    repo_search: RepoSearch,
}

impl CrossRepoSearch {
    pub fn new(db: Database) -> Self {
        let repo_search = RepoSearch::new(db.clone());
        Self { db, repo_search }
    }

    /// Search every target repository concurrently and merge.
    ///
    /// Never fails: individual repository errors (missing config, store
    /// trouble) are logged and contribute nothing; an empty list comes back
    /// when every source failed or nothing cleared `min_relevance`.
    pub async fn search_across_repositories(
        &self,
        options: &MultiSearchOptions,
    ) -> Vec<CrossRepoHit> {
        let configs = self.resolve_targets(options).await;
        if configs.is_empty() {
            return Vec::new();
        }

        let now = Utc::now();
        let searches = configs
            .iter()
            .map(|config| self.search_one(config, options, now));
        let per_repo: Vec<Vec<CrossRepoHit>> = join_all(searches).await;

        let merged: Vec<CrossRepoHit> = per_repo.into_iter().flatten().collect();
        let mut ranked = rank_by_score_and_priority(merged, |h| h.score, |h| h.priority);
        ranked.truncate(options.limit);
        ranked
    }

    /// Chat-driven entry point: derive a keyword query from free text, then
    /// fan out with default options. No keywords, no search.
    pub async fn search_by_message_content(&self, text: &str) -> Vec<CrossRepoHit> {
        let keywords = extract_technical_keywords(text);
        if keywords.is_empty() {
            debug!("no technical keywords in message; skipping search");
            return Vec::new();
        }
        let options = MultiSearchOptions {
            query: keywords.join(" "),
            ..Default::default()
        };
        self.search_across_repositories(&options).await
    }

    async fn resolve_targets(&self, options: &MultiSearchOptions) -> Vec<RepositoryConfig> {
        match &options.repositories {
            Some(explicit) => {
                let mut configs = Vec::with_capacity(explicit.len());
                for full_name in explicit {
                    match self.db.get_repository(full_name).await {
                        Ok(Some(config)) if config.enabled => configs.push(config),
                        Ok(Some(_)) => {
                            warn!(repository = %full_name, "target is disabled; skipping")
                        }
                        Ok(None) => {
                            warn!(repository = %full_name, "target is not configured; skipping")
                        }
                        Err(e) => {
                            warn!(repository = %full_name, error = %e, "target lookup failed; skipping")
                        }
                    }
                }
                configs
            }
            None => match self.db.enabled_repositories().await {
                Ok(configs) => configs,
                Err(e) => {
                    warn!(error = %e, "could not list enabled repositories");
                    Vec::new()
                }
            },
        }
    }

    async fn search_one(
        &self,
        config: &RepositoryConfig,
        options: &MultiSearchOptions,
        now: DateTime<Utc>,
    ) -> Vec<CrossRepoHit> {
        let repository = config.full_name();
        let per_repo = SearchOptions {
            limit: options.limit,
            state: options.state,
            min_relevance: options.min_relevance * PER_REPO_RELEVANCE_FACTOR,
            use_cache: true,
        };

        let candidates = match self
            .repo_search
            .search(&repository, &options.query, &per_repo)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(repository = %repository, error = %e, "repository search failed; contributing zero results");
                return Vec::new();
            }
        };

        let mut hits = Vec::with_capacity(candidates.len());
        for scored in candidates {
            let weighted = score_issue_weighted(&scored.issue, &options.query, now);
            if weighted.score < options.min_relevance {
                continue;
            }

            let snippet = snippet_for(&scored.issue, &options.query, weighted.matched_field);
            let comments = if options.include_comments {
                self.db
                    .comments_for_issue(&repository, scored.issue.number)
                    .await
                    .unwrap_or_default()
            } else {
                Vec::new()
            };

            let mut issue = scored.issue;
            if !options.include_body {
                issue.body = String::new();
            }

            hits.push(CrossRepoHit {
                issue,
                score: weighted.score,
                priority: config.priority,
                matched_field: weighted.matched_field,
                snippet,
                comments,
            });
        }
        hits
    }
}

/// Snippet around the first query token that occurs in the matched field.
fn snippet_for(issue: &Issue, query: &str, field: Option<MatchField>) -> Option<String> {
    let labels_joined;
    let text: &str = match field? {
        MatchField::Title => &issue.title,
        MatchField::Body => &issue.body,
        MatchField::Labels => {
            labels_joined = issue.label_names().join(", ");
            &labels_joined
        }
    };

    let query = query.to_lowercase();
    query
        .split_whitespace()
        .find_map(|token| extract_snippet(text, token))
}
