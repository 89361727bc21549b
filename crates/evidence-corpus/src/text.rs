//! Small text helpers shared by extraction, ranking, and formatting.
//!
//! Abstracts arrive from four different APIs and are not guaranteed to be
//! ASCII, so every slice here is clamped to a char boundary.

/// Truncate to at most `max` characters without splitting a char.
pub(crate) fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Number of characters (not bytes) in `s`.
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Largest char boundary at or below `idx`.
pub(crate) fn floor_boundary(s: &str, mut idx: usize) -> usize {
    if idx >= s.len() {
        return s.len();
    }
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

/// Smallest char boundary at or above `idx`.
pub(crate) fn ceil_boundary(s: &str, mut idx: usize) -> usize {
    if idx >= s.len() {
        return s.len();
    }
    while !s.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

/// A window of `s` around the byte offset `at`, extending `before` bytes back
/// and `after` bytes forward, clamped to char boundaries.
pub(crate) fn window(s: &str, at: usize, before: usize, after: usize) -> &str {
    let start = floor_boundary(s, at.saturating_sub(before));
    let end = ceil_boundary(s, at.saturating_add(after).min(s.len()));
    &s[start..end]
}

/// Byte offset in `s` of the first case-insensitive occurrence of `needle`.
///
/// `needle` must already be lowercase. The offset indexes `s` itself, so it
/// stays valid even when `s.to_lowercase()` would shift byte positions.
pub(crate) fn find_ignore_case(s: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    s.char_indices().map(|(i, _)| i).find(|&i| {
        let mut rest = s[i..].chars().flat_map(char::to_lowercase);
        needle.chars().all(|n| rest.next() == Some(n))
    })
}

/// Collapse runs of whitespace (including newlines) into single spaces.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_window_clamps_to_boundaries() {
        let s = "naïve transfer";
        // Offset 3 lands inside the two-byte 'ï'; the window must not panic.
        let w = window(s, 3, 2, 4);
        assert!(s.contains(w));
    }

    #[test]
    fn test_find_ignore_case_offsets_original_text() {
        assert_eq!(find_ignore_case("Peak Accuracy here", "accuracy"), Some(5));
        assert_eq!(find_ignore_case("no match", "accuracy"), None);

        // Lowercasing 'İ' grows from two bytes to three; the offset must
        // still index the original string.
        let s = "İİİİ Accuracy of 0.95";
        let idx = find_ignore_case(s, "accuracy").unwrap();
        assert_eq!(&s[idx..idx + 8], "Accuracy");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a\n  b\tc"), "a b c");
        assert_eq!(collapse_whitespace("  lead and trail  "), "lead and trail");
    }

    #[test]
    fn test_char_len() {
        assert_eq!(char_len("héllo"), 5);
        assert_eq!(char_len(""), 0);
    }
}
