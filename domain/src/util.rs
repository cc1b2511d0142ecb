//! Shared utility functions.

/// Keep at most `max_chars` characters of `s`.
///
/// Counts Unicode scalar values rather than bytes, so peer summaries have the
/// same bound regardless of script.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_ascii() {
        assert_eq!(truncate_chars("hello world", 5), "hello");
    }

    #[test]
    fn truncate_no_op_when_short() {
        assert_eq!(truncate_chars("hi", 10), "hi");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        let s = "あのね"; // 9 bytes, 3 chars
        assert_eq!(truncate_chars(s, 2), "あの");
        assert_eq!(truncate_chars(s, 3), "あのね");
    }

    #[test]
    fn truncate_empty() {
        assert_eq!(truncate_chars("", 10), "");
        assert_eq!(truncate_chars("abc", 0), "");
    }
}
