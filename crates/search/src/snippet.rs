//! Matched-text snippet extraction.
//!
//! Shows the region of a field around the first occurrence of a matched
//! token: 50 characters of context before, 100 after, ellipsis on truncated
//! ends. All slicing is clamped to UTF-8 char boundaries.

/// Context window before the match, in bytes (boundary-adjusted).
const CONTEXT_BEFORE: usize = 50;
/// Context window after the match, in bytes (boundary-adjusted).
const CONTEXT_AFTER: usize = 100;

/// Walk `i` down to the nearest char boundary at or before it.
fn floor_char_boundary(s: &str, i: usize) -> usize {
    let mut i = i.min(s.len());
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Extract a snippet around the first case-insensitive occurrence of `token`
/// in `text`. Returns `None` when the token does not occur (or is empty).
pub fn extract_snippet(text: &str, token: &str) -> Option<String> {
    if token.is_empty() {
        return None;
    }
    let pos = text.to_lowercase().find(&token.to_lowercase())?;

    let start = floor_char_boundary(text, pos.saturating_sub(CONTEXT_BEFORE));
    let end = floor_char_boundary(text, pos.saturating_add(token.len() + CONTEXT_AFTER));

    let mut snippet = String::with_capacity(end - start + 6);
    if start > 0 {
        snippet.push_str("...");
    }
    snippet.push_str(text[start..end].trim());
    if end < text.len() {
        snippet.push_str("...");
    }
    Some(snippet)
}
