//! `[typst]` section configuration.
//!
//! Controls how the external `typst` binary is invoked for both
//! `compile` and `query`.
//!
//! ```toml
//! [typst]
//! command = "typst"
//! root = "~"          # Passed as --root; files outside are inaccessible
//! font_paths = []     # Extra --font-path arguments
//! ```

use crate::config::ConfigDiagnostics;
use macros::Config;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The typst compiler binary.
#[derive(Debug, Clone, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "typst")]
pub struct TypstConfig {
    /// Name or path of the typst binary.
    pub command: String,

    /// Project root passed as --root (`~` is expanded).
    pub root: PathBuf,

    /// Additional font directories.
    pub font_paths: Vec<PathBuf>,
}

impl Default for TypstConfig {
    fn default() -> Self {
        Self {
            command: "typst".into(),
            root: "~".into(),
            font_paths: Vec::new(),
        }
    }
}

impl TypstConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.command.trim().is_empty() {
            diag.error_with_hint(Self::FIELDS.command, "must not be empty", "set it to \"typst\"");
            return;
        }

        // Queries degrade to default metadata without the binary
        if which::which(&self.command).is_err() {
            diag.hint(
                Self::FIELDS.command,
                format!(
                    "`{}` not found in PATH, compile will fail and metadata falls back to defaults",
                    self.command
                ),
            );
        }
    }

    /// `--font-path` arguments for every configured font directory.
    pub fn font_args(&self) -> Vec<std::ffi::OsString> {
        self.font_paths
            .iter()
            .flat_map(|p| ["--font-path".into(), p.as_os_str().to_owned()])
            .collect()
    }
}
