//! Relevance scoring for issue search.
//!
//! Everything in this crate is a pure function over an issue and a query
//! string — no I/O, no clocks (callers pass `now` in), no shared state. The
//! store and the engine crates decide *which* issues to score; this crate
//! decides *how well* each one matches.
//!
//! # Architecture
//!
//! - **Vector build**: `vector::build_issue_vector` — normalized token bag,
//!   rebuilt on every upsert
//! - **Scoring**: `score::score_issue` (single-repository variant) and
//!   `score::score_issue_weighted` (multi-repository variant with
//!   recency/state/popularity boosts)
//! - **Presentation**: `snippet::extract_snippet` — context window around the
//!   first matched token
//! - **Query derivation**: `keywords::extract_technical_keywords` — turns
//!   free-form chat text into a search query
//! - **Ordering**: `rank::rank_by_score_and_priority` — the tie-band merge
//!   used when combining results from multiple repositories
//!
//! The two scorer variants are intentionally distinct formulas with distinct
//! callers; see the module docs on [`score`] before unifying them.

pub mod keywords;
pub mod rank;
pub mod score;
pub mod snippet;
pub mod types;
pub mod vector;

pub use keywords::extract_technical_keywords;
pub use rank::{rank_by_score_and_priority, SCORE_TIE_BAND};
pub use score::{score_issue, score_issue_weighted, WeightedScore};
pub use snippet::extract_snippet;
pub use types::{MatchField, ScoredIssue};
pub use vector::{build_issue_vector, build_search_vector};

use issue_scout_types::Issue;

/// Score and wrap an issue with the single-repository formula, clamped to
/// [0, 1] for ranking. The raw (unclamped) value is available through
/// [`score_issue`] directly.
pub fn scored(issue: Issue, query: &str) -> ScoredIssue {
    let score = score_issue(&issue, query).clamp(0.0, 1.0);
    ScoredIssue { issue, score }
}
