//! Deterministic merge ordering for multi-repository results.
//!
//! Primary order is relevance score descending. When two scores sit within
//! [`SCORE_TIE_BAND`] of each other, repository priority (descending) decides
//! instead — near-equal relevance should not be settled by rounding noise.
//!
//! The band rule is not a total order (it is intentionally non-transitive at
//! band edges), so this is an explicit insertion pass rather than a
//! `sort_by` comparator: each item is placed before the first element it
//! outranks, which keeps the result stable and deterministic for any input.

/// Score distance under which repository priority breaks the tie.
pub const SCORE_TIE_BAND: f64 = 0.1;

/// `true` when `(score_a, prio_a)` should be ordered ahead of
/// `(score_b, prio_b)`.
fn outranks(score_a: f64, prio_a: i64, score_b: f64, prio_b: i64) -> bool {
    if (score_a - score_b).abs() < SCORE_TIE_BAND {
        prio_a > prio_b
    } else {
        score_a > score_b
    }
}

/// Order `items` by descending score with the tie-band priority rule.
///
/// Insertion is stable: an item that neither outranks nor is outranked keeps
/// arrival order, so identical inputs always produce identical output
/// regardless of how the per-repository futures completed.
pub fn rank_by_score_and_priority<T>(
    items: Vec<T>,
    score: impl Fn(&T) -> f64,
    priority: impl Fn(&T) -> i64,
) -> Vec<T> {
    let mut ranked: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        let pos = ranked
            .iter()
            .position(|existing| {
                outranks(score(&item), priority(&item), score(existing), priority(existing))
            })
            .unwrap_or(ranked.len());
        ranked.insert(pos, item);
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    // (score, priority, tag)
    type Hit = (f64, i64, &'static str);

    fn rank(items: Vec<Hit>) -> Vec<&'static str> {
        rank_by_score_and_priority(items, |h| h.0, |h| h.1)
            .into_iter()
            .map(|h| h.2)
            .collect()
    }

    #[test]
    fn clear_score_gap_ignores_priority() {
        let out = rank(vec![(0.5, 100, "low"), (0.9, 0, "high")]);
        assert_eq!(out, vec!["high", "low"]);
    }

    #[test]
    fn within_band_priority_decides() {
        let out = rank(vec![(0.82, 1, "secondary"), (0.85, 5, "primary")]);
        assert_eq!(out, vec!["primary", "secondary"]);

        // Same pair, higher priority on the slightly lower score.
        let out = rank(vec![(0.85, 1, "a"), (0.82, 5, "b")]);
        assert_eq!(out, vec!["b", "a"]);
    }

    #[test]
    fn band_boundary_is_exclusive() {
        // Exactly 0.1 apart is NOT a tie: score wins.
        let out = rank(vec![(0.7, 9, "lower"), (0.8, 0, "upper")]);
        assert_eq!(out, vec!["upper", "lower"]);
    }

    #[test]
    fn equal_rank_keeps_arrival_order() {
        let out = rank(vec![(0.5, 3, "first"), (0.5, 3, "second"), (0.5, 3, "third")]);
        assert_eq!(out, vec!["first", "second", "third"]);
    }

    #[test]
    fn is_deterministic_for_identical_input() {
        let items = vec![
            (0.91, 2, "a"),
            (0.87, 7, "b"),
            (0.55, 9, "c"),
            (0.52, 1, "d"),
        ];
        assert_eq!(rank(items.clone()), rank(items));
    }
}
