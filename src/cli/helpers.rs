//! Shared helper functions for CLI output

/// Truncate a string to `max_len` characters, adding "..." if truncated
///
/// Counts characters rather than bytes so customer names with umlauts or
/// other multi-byte text never split mid-character.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Escape a string for CSV output (RFC 4180)
pub fn escape_csv(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Pluralize "case" for summary lines
pub fn cases_label(count: usize) -> &'static str {
    if count == 1 {
        "case"
    } else {
        "cases"
    }
}
