//! `[templates]` section configuration.
//!
//! ```toml
//! [templates]
//! dir = "templates"   # <name>.typ files here override the built-ins
//! default = "note"
//! ```

use crate::config::ConfigDiagnostics;
use macros::Config;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Note templates.
#[derive(Debug, Clone, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "templates")]
pub struct TemplatesConfig {
    /// Directory with user templates (relative to the config file).
    pub dir: PathBuf,

    /// Template used by `typnote new` without --template.
    pub default: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            dir: "templates".into(),
            default: "note".into(),
        }
    }
}

impl TemplatesConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.default.trim().is_empty() {
            diag.error_with_hint(
                Self::FIELDS.default,
                "must not be empty",
                format!(
                    "built-in templates: {}",
                    crate::embed::builtin_names().join(", ")
                ),
            );
        }
    }
}
