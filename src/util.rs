// src/util.rs — Shared utility functions

/// Truncate a string for display/logging (UTF-8 safe).
///
/// Returns a substring of at most `max_len` bytes, ensuring the cut
/// point falls on a valid UTF-8 character boundary.
pub fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        &s[..end]
    }
}

/// Keep only the last `max_chars` characters of `s`.
///
/// Counts characters, not bytes, so the cut never splits a code point.
pub fn tail_chars(s: &str, max_chars: usize) -> &str {
    if max_chars == 0 {
        return "";
    }
    match s.char_indices().rev().nth(max_chars - 1) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short() {
        assert_eq!(truncate_str("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_long() {
        assert_eq!(truncate_str("hello world", 5), "hello");
    }

    #[test]
    fn test_truncate_multibyte() {
        // "café" is 5 bytes (é = 2 bytes), truncating at 4 should not split é
        assert_eq!(truncate_str("café", 4), "caf");
    }

    #[test]
    fn test_tail_shorter_than_limit() {
        assert_eq!(tail_chars("boom", 10), "boom");
    }

    #[test]
    fn test_tail_exact() {
        assert_eq!(tail_chars("boom", 4), "boom");
    }

    #[test]
    fn test_tail_keeps_end() {
        assert_eq!(tail_chars("Traceback ... ZeroDivisionError", 17), "ZeroDivisionError");
    }

    #[test]
    fn test_tail_multibyte() {
        assert_eq!(tail_chars("ab→ç", 2), "→ç");
    }

    #[test]
    fn test_tail_zero() {
        assert_eq!(tail_chars("hello", 0), "");
        assert_eq!(tail_chars("", 3), "");
    }
}
