//! Technical-keyword extraction from chat text.
//!
//! Turns a free-form message into a short query for the multi-repository
//! search, so chat callers never have to author a query themselves. Inline
//! code spans are collected first — they are the strongest signal the user
//! gave us and must survive the result cap — followed by fixed vocabulary
//! categories in a stable order.

use std::sync::LazyLock;

use regex_lite::Regex;

/// Maximum number of keywords returned.
const MAX_KEYWORDS: usize = 10;

/// Inline code spans: back-tick delimited, 3–49 characters, kept verbatim
/// (lowercased).
static CODE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]{3,49})`").unwrap());

/// Category vocabularies, scanned in order. Order is part of the output
/// contract: earlier categories land earlier in the keyword list.
static CATEGORIES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Languages & frameworks
        r"(?i)\b(typescript|javascript|python|rust|golang|java|kotlin|swift|ruby|php|react|vue|angular|svelte|next\.?js|node|deno|django|flask|rails|spring|tokio|axum|express)\b",
        // Error / bug vocabulary
        r"(?i)\b(error|exception|panic|crash|crashes|bug|failure|failing|failed|fails|broken|traceback|stacktrace|segfault|deadlock|timeout|leak)\b",
        // Language constructs
        r"(?i)\b(function|method|class|struct|enum|trait|interface|module|closure|async|await|promise|callback|generic|macro|iterator|lifetime|borrow)\b",
        // Common runtime values
        r"(?i)\b(undefined|null|none|nil|nan|infinity|true|false)\b",
        // Build tooling
        r"(?i)\b(webpack|vite|rollup|esbuild|babel|eslint|cargo|rustc|clippy|npm|yarn|pnpm|pip|poetry|maven|gradle|docker|kubernetes|cmake|bazel)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Extract up to ten deduplicated, lowercase technical keywords from free
/// text: back-tick code spans first, then the fixed category vocabularies in
/// order of appearance within each category.
pub fn extract_technical_keywords(text: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();

    let mut push = |candidate: String| {
        if keywords.len() < MAX_KEYWORDS && !keywords.contains(&candidate) {
            keywords.push(candidate);
        }
    };

    for caps in CODE_SPAN.captures_iter(text) {
        if let Some(span) = caps.get(1) {
            push(span.as_str().to_lowercase());
        }
    }

    for category in CATEGORIES.iter() {
        for m in category.find_iter(text) {
            push(m.as_str().to_lowercase());
        }
    }

    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_up_category_vocabulary_in_order() {
        let kw = extract_technical_keywords(
            "My TypeScript build throws an error when webpack runs",
        );
        assert_eq!(kw, vec!["typescript", "error", "webpack"]);
    }

    #[test]
    fn code_spans_come_first_and_are_verbatim_lowercased() {
        let kw = extract_technical_keywords(
            "calling `FooBar.render()` gives a null error in react",
        );
        assert_eq!(kw[0], "foobar.render()");
        assert!(kw.contains(&"react".to_string()));
        assert!(kw.contains(&"null".to_string()));
        assert!(kw.contains(&"error".to_string()));
    }

    #[test]
    fn code_spans_outside_length_bounds_are_ignored() {
        // Two characters: too short.
        assert!(extract_technical_keywords("see `ab` here").is_empty());
        // Fifty-plus characters: too long.
        let long = format!("see `{}` here", "x".repeat(60));
        assert!(extract_technical_keywords(&long).is_empty());
        // Three characters: kept.
        assert_eq!(extract_technical_keywords("see `abc` here"), vec!["abc"]);
    }

    #[test]
    fn deduplicates_and_caps_at_ten() {
        let text = "error error ERROR rust rust python javascript typescript react vue \
                    angular svelte node deno django flask panic crash bug webpack";
        let kw = extract_technical_keywords(text);
        assert_eq!(kw.len(), 10);
        let mut unique = kw.clone();
        unique.dedup();
        assert_eq!(unique.len(), kw.len());
        assert!(kw.iter().all(|k| k.chars().all(|c| !c.is_uppercase())));
    }

    #[test]
    fn plain_prose_yields_nothing() {
        assert!(extract_technical_keywords("hello, how is your day going?").is_empty());
    }
}
