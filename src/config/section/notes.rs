//! `[notes]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [notes]
//! dir = "notes"               # Relative to the config file, `~` allowed
//! filename = "{date}-{slug}"  # Placeholders: {date} {slug} {title} {type}
//! date_format = "%Y-%m-%d"    # strftime pattern for {date}
//! extension = "typ"
//! separator = "dash"          # Slug separator: dash | underscore
//! ```

use crate::config::ConfigDiagnostics;
use crate::note::FilenamePattern;
use crate::utils::date::validate_date_format;
use macros::Config;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Separator character for slugs.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SlugSeparator {
    /// Dash separator (`-`) (default).
    #[default]
    Dash,
    /// Underscore separator (`_`).
    Underscore,
}

impl SlugSeparator {
    /// Get the character representation.
    pub const fn as_char(&self) -> char {
        match self {
            Self::Dash => '-',
            Self::Underscore => '_',
        }
    }
}

/// Where notes live and how new notes are named.
#[derive(Debug, Clone, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "notes")]
pub struct NotesConfig {
    /// Directory holding notes (relative to the config file).
    pub dir: PathBuf,

    /// Filename pattern for new notes.
    #[config(inline_doc = "placeholders: {date} {slug} {title} {type}")]
    pub filename: String,

    /// strftime pattern used for the {date} placeholder.
    pub date_format: String,

    /// Note file extension, without the dot.
    pub extension: String,

    /// Slug separator: "dash" or "underscore".
    pub separator: SlugSeparator,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            dir: "notes".into(),
            filename: "{date}-{slug}".into(),
            date_format: "%Y-%m-%d".into(),
            extension: "typ".into(),
            separator: SlugSeparator::Dash,
        }
    }
}

impl NotesConfig {
    /// Extension without a leading dot.
    pub fn extension(&self) -> &str {
        self.extension.trim_start_matches('.')
    }

    /// Parsed filename pattern.
    ///
    /// Only valid after [`NotesConfig::validate`] passed.
    pub fn pattern(&self) -> anyhow::Result<FilenamePattern> {
        FilenamePattern::parse(&self.filename)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.filename.trim().is_empty() {
            diag.error(Self::FIELDS.filename, "must not be empty");
        } else if let Err(e) = FilenamePattern::parse(&self.filename) {
            diag.error_with_hint(
                Self::FIELDS.filename,
                e.to_string(),
                "available placeholders: {date} {slug} {title} {type}",
            );
        }

        if let Err(e) = validate_date_format(&self.date_format) {
            diag.error_with_hint(
                Self::FIELDS.date_format,
                e.to_string(),
                "use strftime specifiers such as %Y-%m-%d",
            );
        }

        if self.extension().is_empty() {
            diag.error(Self::FIELDS.extension, "must not be empty");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.notes.dir, PathBuf::from("notes"));
        assert_eq!(config.notes.filename, "{date}-{slug}");
        assert_eq!(config.notes.date_format, "%Y-%m-%d");
        assert_eq!(config.notes.extension(), "typ");
        assert_eq!(config.notes.separator, SlugSeparator::Dash);
    }

    #[test]
    fn test_separator_parsing() {
        let config = test_parse_config("[notes]\nseparator = \"underscore\"");
        assert_eq!(config.notes.separator, SlugSeparator::Underscore);
        assert_eq!(config.notes.separator.as_char(), '_');
    }

    #[test]
    fn test_extension_leading_dot() {
        let config = test_parse_config("[notes]\nextension = \".typ\"");
        assert_eq!(config.notes.extension(), "typ");
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let config =
            test_parse_config("[notes]\nfilename = \"{date}-{author}\"\ndate_format = \"%Q\"\nextension = \"\"");
        let mut diag = ConfigDiagnostics::new();
        config.notes.validate(&mut diag);

        let fields: Vec<_> = diag.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["notes.filename", "notes.date_format", "notes.extension"]);
    }

    #[test]
    fn test_time_specifier_in_date_format_rejected() {
        let config = test_parse_config("[notes]\ndate_format = \"%Y-%m-%d_%H%M\"");
        let mut diag = ConfigDiagnostics::new();
        config.notes.validate(&mut diag);

        assert_eq!(diag.errors().len(), 1);
        assert_eq!(diag.errors()[0].field.as_str(), "notes.date_format");
    }

    #[test]
    fn test_validate_empty_filename() {
        let config = test_parse_config("[notes]\nfilename = \"  \"");
        let mut diag = ConfigDiagnostics::new();
        config.notes.validate(&mut diag);
        assert_eq!(diag.errors().len(), 1);
        assert!(diag.errors()[0].message.contains("empty"));
    }

    #[test]
    fn test_template_output() {
        let template = NotesConfig::template_with_header();
        assert!(template.contains("[notes]"));
        assert!(template.contains("dir = \"notes\""));
        assert!(template.contains("filename = \"{date}-{slug}\""));
        assert!(template.contains("separator = \"dash\""));
        assert_eq!(NotesConfig::FIELDS.date_format.as_str(), "notes.date_format");
    }
}
