//! `[pdf]` section configuration.
//!
//! ```toml
//! [pdf]
//! output_dir = "pdf"      # Omit to write PDFs next to their notes
//! viewer = ["zathura"]    # Omit to use the platform opener
//! ```

use crate::config::ConfigDiagnostics;
use macros::Config;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Compiled PDF output.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "pdf")]
pub struct PdfConfig {
    /// Directory for compiled PDFs (relative to the config file).
    pub output_dir: Option<PathBuf>,

    /// Viewer command; the PDF path is appended.
    pub viewer: Vec<String>,
}

impl PdfConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Some(program) = self.viewer.first()
            && which::which(program).is_err()
        {
            diag.warn(
                Self::FIELDS.viewer,
                format!("`{program}` not found in PATH, `--open` will fail"),
            );
        }
    }
}
