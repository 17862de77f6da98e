//! Platform utilities.

/// Command that opens a file with the desktop's default application.
///
/// Picked at compile time:
///
/// - `open` on macOS
/// - `explorer` on Windows
/// - `xdg-open` everywhere else
pub const OPENER: &[&str] = {
    #[cfg(target_os = "macos")]
    {
        &["open"]
    }

    #[cfg(target_os = "windows")]
    {
        &["explorer"]
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        &["xdg-open"]
    }
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opener_not_empty() {
        assert!(!OPENER.is_empty());
        assert!(OPENER.iter().all(|part| !part.is_empty()));
    }
}
