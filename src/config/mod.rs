//! Notebook configuration management for `typnote.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── notes      # [notes]
//! │   ├── templates  # [templates]
//! │   ├── typst      # [typst]
//! │   └── pdf        # [pdf]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # NoteConfig (this file)
//! ```
//!
//! The config file is optional: without one, every section takes its
//! defaults and the current directory becomes the notebook root.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{NotesConfig, PdfConfig, SlugSeparator, TemplatesConfig, TypstConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{Cli, Commands},
    log,
    utils::path::{expand_path, normalize_path},
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing typnote.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteConfig {
    /// Path to the config file, which may not exist (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Notebook root: parent of the config file, or cwd (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    pub notes: NotesConfig,
    pub templates: TemplatesConfig,
    pub typst: TypstConfig,
    pub pdf: PdfConfig,
}

impl NoteConfig {
    /// Load configuration for the given command line.
    ///
    /// `init` targets its own directory and never reads an existing file.
    /// Every other command searches upward from cwd.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let (config_path, exists) = Self::resolve_config_path(cli, &cwd);

        let mut config = if exists && !cli.is_init() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };

        let root = if cli.is_init() || exists {
            config_path.parent().map(Path::to_path_buf).unwrap_or_else(|| cwd.clone())
        } else {
            cwd
        };

        config.config_path = config_path;
        config.finalize(&root);

        if !cli.is_init() {
            config.validate()?;
        }

        Ok(config)
    }

    /// Resolve config file path based on command.
    fn resolve_config_path(cli: &Cli, cwd: &Path) -> (PathBuf, bool) {
        match &cli.command {
            Commands::Init { name, .. } => {
                let dir = name.as_ref().map_or_else(|| cwd.to_path_buf(), |n| cwd.join(n));
                let path = dir.join(&cli.config);
                let exists = path.exists();
                (path, exists)
            }
            _ => match find_config_file(cwd, &cli.config) {
                Some(path) => (path, true),
                None => (cwd.join(&cli.config), false),
            },
        }
    }

    /// Defaults rooted at `root`, as used when no config file exists.
    pub fn with_root(root: &Path) -> Self {
        let mut config = Self {
            config_path: root.join("typnote.toml"),
            ..Self::default()
        };
        config.finalize(root);
        config
    }

    /// Anchor every configured path at the notebook root.
    fn finalize(&mut self, root: &Path) {
        self.root = normalize_path(root);
        self.config_path = normalize_path(&self.config_path);

        self.notes.dir = expand_path(&self.notes.dir, &self.root);
        self.templates.dir = expand_path(&self.templates.dir, &self.root);
        self.typst.root = expand_path(&self.typst.root, &self.root);
        self.typst.font_paths = self
            .typst
            .font_paths
            .iter()
            .map(|p| expand_path(p, &self.root))
            .collect();
        // `output_dir = ""` means next to the note, same as leaving it out
        self.pdf.output_dir = self
            .pdf
            .output_dir
            .take()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| expand_path(&dir, &self.root));
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {} are ignored: {}", display_path, fields.join(", "));
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.notes.validate(&mut diag);
        self.templates.validate(&mut diag);
        self.typst.validate(&mut diag);
        self.pdf.validate(&mut diag);

        diag.print_hints_and_warnings();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config content.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> NoteConfig {
    let (parsed, ignored) = NoteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_invalid_toml() {
        let result = NoteConfig::parse_with_ignored("[notes\ndir = \"x\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[notes]\ndir = \"kb\"\nautosave = true\n[unknown_section]\nfield = 1";
        let (config, ignored) = NoteConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.notes.dir, PathBuf::from("kb"));
        assert!(ignored.iter().any(|f| f.contains("autosave")));
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_finalize_anchors_paths_at_root() {
        let dir = TempDir::new().unwrap();
        let mut config = test_parse_config(
            "[notes]\ndir = \"kb\"\n[pdf]\noutput_dir = \"out\"\n[typst]\nroot = \".\"",
        );
        config.finalize(dir.path());

        let root = normalize_path(dir.path());
        assert_eq!(config.root, root);
        assert_eq!(config.notes.dir, root.join("kb"));
        assert_eq!(config.templates.dir, root.join("templates"));
        assert_eq!(config.pdf.output_dir, Some(root.join("out")));
        assert_eq!(config.typst.root, root);
    }

    #[test]
    fn test_empty_output_dir_means_next_to_note() {
        let mut config = test_parse_config("[pdf]\noutput_dir = \"\"");
        config.finalize(Path::new("/kb"));
        assert!(config.pdf.output_dir.is_none());
    }

    #[test]
    fn test_default_typst_root_is_home() {
        let dir = TempDir::new().unwrap();
        let config = NoteConfig::with_root(dir.path());
        assert!(config.typst.root.is_absolute());
        assert!(!config.typst.root.to_string_lossy().contains('~'));
    }

    #[test]
    fn test_from_path_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("typnote.toml");
        fs::write(&path, "[templates]\ndefault = \"daily\"\n[notes]\ntypo = 1\n").unwrap();

        let config = NoteConfig::from_path(&path).unwrap();
        assert_eq!(config.templates.default, "daily");
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = NoteConfig::from_path(Path::new("/nonexistent/typnote.toml")).unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }

    #[test]
    fn test_validate_reports_diagnostics() {
        let mut config = test_parse_config("[notes]\nfilename = \"\"\n[typst]\ncommand = \"\"");
        config.finalize(Path::new("/tmp"));
        let err = config.validate().unwrap_err();
        let Some(ConfigError::Diagnostics(diag)) = err.downcast_ref::<ConfigError>() else {
            panic!("expected diagnostics");
        };
        assert_eq!(diag.errors().len(), 2);
    }
}
