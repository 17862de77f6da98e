//! Pluralization for log lines ("1 note", "3 notes").

/// `"s"` unless `n == 1`.
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Format count with noun: `plural_count(3, "note")` -> `"3 notes"`.
///
/// Only the last word is pluralized, so `"note with metadata"` should be
/// phrased as `"tagged note"` instead.
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{count} {noun}{}", plural_s(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "note"), "0 notes");
        assert_eq!(plural_count(1, "note"), "1 note");
        assert_eq!(plural_count(12, "file"), "12 files");
    }
}
