//! Search-vector construction.
//!
//! The vector is a single lowercase token string derived from an issue's
//! title, body, and label names. It is rebuilt on every upsert — a stored
//! vector is never older than the text it was derived from, so scoring can
//! trust it without revalidation.

use issue_scout_types::Issue;

/// Minimum token length kept in the vector. No stemming, no stop-word list —
/// the length filter is the only pruning.
const MIN_TOKEN_LEN: usize = 3;

/// Build the normalized token string for an issue's text fields.
///
/// Lowercases the concatenation of title, body, and label names, collapses
/// punctuation to spaces, drops tokens shorter than three characters, and
/// re-joins with single spaces. Deterministic and pure.
pub fn build_search_vector(title: &str, body: &str, labels: &[&str]) -> String {
    let mut combined = String::with_capacity(title.len() + body.len() + 16);
    combined.push_str(title);
    combined.push(' ');
    combined.push_str(body);
    for label in labels {
        combined.push(' ');
        combined.push_str(label);
    }

    let lowered = combined.to_lowercase();
    let normalized: String = lowered
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    normalized
        .split_whitespace()
        .filter(|t| t.chars().count() >= MIN_TOKEN_LEN)
        .collect::<Vec<_>>()
        .join(" ")
}

/// [`build_search_vector`] over an issue's current title/body/labels.
pub fn build_issue_vector(issue: &Issue) -> String {
    build_search_vector(&issue.title, &issue.body, &issue.label_names())
}
