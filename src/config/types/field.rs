//! Type-safe config field path.

use owo_colors::OwoColorize;
use std::fmt;

/// A config field path such as `notes.filename`.
///
/// Produced by `#[derive(Config)]`, which generates a `FIELDS` constant with
/// one `FieldPath` per field, so diagnostics never spell paths by hand:
///
/// ```ignore
/// diag.error(NotesConfig::FIELDS.filename, "must not be empty");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(pub &'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_path_display_contains_path() {
        owo_colors::set_override(false);
        let path = FieldPath::new("notes.filename");
        assert_eq!(path.as_str(), "notes.filename");
        assert_eq!(path.to_string(), "`notes.filename`");
    }
}
