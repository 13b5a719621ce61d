//! The two relevance formulas.
//!
//! [`score_issue`] serves the single-repository search path; it averages
//! fixed per-field bonuses over the query tokens and does **not** clamp.
//! [`score_issue_weighted`] serves the multi-repository coordinator; it
//! weights the best match location per token, adds recency/state/popularity
//! boosts, and clamps to 1.0.
//!
//! The formulas are kept as two separate functions on purpose — they have
//! distinct callers and distinct test suites, and unifying them would change
//! observable ranking behavior on both paths.

use chrono::{DateTime, Utc};
use issue_scout_types::{Issue, IssueState};

use crate::types::MatchField;

/// Days over which the recency boost decays linearly to zero.
const RECENCY_WINDOW_DAYS: f64 = 365.0;

/// Engagement count at which the popularity boost saturates.
const POPULARITY_CAP: i64 = 10;

/// Single-repository relevance: per query token, +0.5 for a title substring
/// match, +0.3 for body, +0.2 for any label, +0.1 for a search-vector hit;
/// summed and divided by the token count.
///
/// A single matching token in a multi-token query therefore yields a
/// fractional score rather than saturating. The per-token contributions can
/// sum past 1.0 when one token hits every field — this function does not
/// clamp, and callers must `clamp(0.0, 1.0)` before using the value for
/// ranking or boosts.
///
/// An empty query scores 0. An issue with an empty search vector gets no
/// vector-term contribution but can still match on title/body/labels.
pub fn score_issue(issue: &Issue, query: &str) -> f64 {
    let query = query.to_lowercase();
    let tokens: Vec<&str> = query.split_whitespace().collect();
    if tokens.is_empty() {
        return 0.0;
    }

    let title = issue.title.to_lowercase();
    let body = issue.body.to_lowercase();
    let labels: Vec<String> = issue
        .labels
        .iter()
        .map(|l| l.name.to_lowercase())
        .collect();

    let mut total = 0.0;
    for token in &tokens {
        if title.contains(token) {
            total += 0.5;
        }
        if body.contains(token) {
            total += 0.3;
        }
        if labels.iter().any(|l| l.contains(token)) {
            total += 0.2;
        }
        if issue.search_vector.contains(token) {
            total += 0.1;
        }
    }

    total / tokens.len() as f64
}

/// Result of the weighted (multi-repository) formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedScore {
    /// Final relevance, clamped to [0, 1].
    pub score: f64,
    /// The field that matched the most query tokens, if any matched at all.
    /// Ties resolve title > body > labels.
    pub matched_field: Option<MatchField>,
}

/// Multi-repository relevance: each token contributes the weight of its best
/// matching location (title 1.0, body 0.7, labels 0.6), averaged over the
/// token count, then boosted and clamped.
///
/// Boosts:
/// - recency: up to +0.1, decaying linearly to 0 over 365 days since
///   `updated_at`
/// - open state: +0.1
/// - popularity: up to +0.1, proportional to the reaction count capped at 10
///
/// `now` is injected so rankings are reproducible in tests.
pub fn score_issue_weighted(issue: &Issue, query: &str, now: DateTime<Utc>) -> WeightedScore {
    let query = query.to_lowercase();
    let tokens: Vec<&str> = query.split_whitespace().collect();
    if tokens.is_empty() {
        return WeightedScore {
            score: 0.0,
            matched_field: None,
        };
    }

    let title = issue.title.to_lowercase();
    let body = issue.body.to_lowercase();
    let labels: Vec<String> = issue
        .labels
        .iter()
        .map(|l| l.name.to_lowercase())
        .collect();

    let mut weight_sum = 0.0;
    let mut title_hits = 0usize;
    let mut body_hits = 0usize;
    let mut label_hits = 0usize;

    for token in &tokens {
        if title.contains(token) {
            weight_sum += 1.0;
            title_hits += 1;
        } else if body.contains(token) {
            weight_sum += 0.7;
            body_hits += 1;
        } else if labels.iter().any(|l| l.contains(token)) {
            weight_sum += 0.6;
            label_hits += 1;
        }
    }

    let base = weight_sum / tokens.len() as f64;

    let mut score = base;
    score += recency_boost(issue.updated_at, now);
    if issue.state == IssueState::Open {
        score += 0.1;
    }
    score += popularity_boost(issue.reactions);

    let matched_field = if title_hits >= body_hits && title_hits >= label_hits && title_hits > 0 {
        Some(MatchField::Title)
    } else if body_hits >= label_hits && body_hits > 0 {
        Some(MatchField::Body)
    } else if label_hits > 0 {
        Some(MatchField::Labels)
    } else {
        None
    };

    WeightedScore {
        score: score.clamp(0.0, 1.0),
        matched_field,
    }
}

fn recency_boost(updated_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let days = (now - updated_at).num_days().max(0) as f64;
    if days >= RECENCY_WINDOW_DAYS {
        return 0.0;
    }
    0.1 * (1.0 - days / RECENCY_WINDOW_DAYS)
}

fn popularity_boost(reactions: i64) -> f64 {
    0.1 * reactions.clamp(0, POPULARITY_CAP) as f64 / POPULARITY_CAP as f64
}
