//! Small string helpers shared by the fetch client and the card renderer.

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` characters with an ellipsis and
/// byte count indicator appended. The cut always lands on a character
/// boundary, so multi-byte text is safe to pass in.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Collapse runs of whitespace (including newlines) into single spaces.
///
/// Publisher descriptions often carry stray line breaks and indentation
/// which break the card layout.
pub fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        let s = "é".repeat(10);
        let result = truncate_for_log(&s, 3);
        assert_eq!(result, "ééé…(+14 bytes)");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("  one\n\ttwo   three \n"), "one two three");
        assert_eq!(single_line(""), "");
    }
}
