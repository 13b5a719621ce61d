//! Single-repository search with the TTL cache in front.
//!
//! The cache is purely an optimization: any storage error on read or write
//! is logged and treated as a miss, and the search recomputes from the
//! store. A misconfigured target, by contrast, is a caller mistake and comes
//! back as a typed error.

use chrono::Utc;
use issue_scout_db::{Database, DEFAULT_CACHE_TTL_SECS};
use issue_scout_search::{scored, ScoredIssue};
use issue_scout_types::IssueState;
use tracing::{debug, warn};

use crate::{EngineError, EngineResult};

/// Knobs for one search call.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub limit: usize,
    /// `None` searches both open and closed issues.
    pub state: Option<IssueState>,
    /// Results scoring below this are discarded.
    pub min_relevance: f64,
    pub use_cache: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: 20,
            state: None,
            min_relevance: 0.1,
            use_cache: true,
        }
    }
}

/// Cache-aware search within one configured repository.
#[derive(Debug, Clone)]
pub struct RepoSearch {
    db: Database,
}

impl RepoSearch {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Search a repository's mirrored issues for `query`.
    ///
    /// Results are sorted strictly descending by score; ties keep the
    /// store's retrieval order (`updated_at DESC`) — priority tie-breaks
    /// belong to the multi-repository layer, not here.
    ///
    /// Errors only for caller mistakes (unknown or disabled repository) and
    /// genuine store failures on the recompute path.
    pub async fn search(
        &self,
        repository: &str,
        query: &str,
        options: &SearchOptions,
    ) -> EngineResult<Vec<ScoredIssue>> {
        let config = self
            .db
            .get_repository(repository)
            .await?
            .ok_or_else(|| EngineError::UnknownRepository(repository.to_string()))?;
        if !config.enabled {
            return Err(EngineError::RepositoryDisabled(repository.to_string()));
        }

        let now = Utc::now();

        if options.use_cache {
            match self.db.cache_get(repository, query, now).await {
                Ok(Some(ids)) => match self.db.issues_by_ids(&ids).await {
                    Ok(issues) => {
                        debug!(repository, query, hits = issues.len(), "search cache hit");
                        // Cached order is authoritative; scores are recomputed
                        // (they are ephemeral and were never stored).
                        return Ok(issues.into_iter().map(|i| scored(i, query)).collect());
                    }
                    Err(e) => {
                        warn!(repository, error = %e, "cache id resolution failed; recomputing");
                    }
                },
                Ok(None) => {}
                Err(e) => {
                    warn!(repository, error = %e, "cache read failed; treating as miss");
                }
            }
        }

        let candidates = self.db.issues_for_repository(repository, options.state).await?;
        let mut results: Vec<ScoredIssue> = candidates
            .into_iter()
            .map(|issue| scored(issue, query))
            .filter(|s| s.score >= options.min_relevance)
            .collect();

        // Stable sort: equal scores keep the store's retrieval order.
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(options.limit);

        if options.use_cache && !results.is_empty() {
            let ids: Vec<i64> = results.iter().map(|s| s.issue.id).collect();
            if let Err(e) = self
                .db
                .cache_put(repository, query, &ids, DEFAULT_CACHE_TTL_SECS, now)
                .await
            {
                warn!(repository, error = %e, "cache write failed; continuing uncached");
            }
        }

        Ok(results)
    }
}
