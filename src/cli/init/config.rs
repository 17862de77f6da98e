//! Configuration file generation.
//!
//! Creates typnote.toml, ignore files and editable copies of the built-in
//! templates for new notebooks.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::config::{NotesConfig, PdfConfig, TemplatesConfig, TypstConfig};
use crate::embed::note::BUILTIN;

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

/// Generate typnote.toml content with comments
pub fn generate_config_template() -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "# typnote configuration file (v{})\n\n",
        env!("CARGO_PKG_VERSION")
    ));

    for section in [
        NotesConfig::template_with_header(),
        TemplatesConfig::template_with_header(),
        TypstConfig::template_with_header(),
        PdfConfig::template_with_header(),
    ] {
        out.push_str(&section);
        out.push('\n');
    }

    out
}

/// Write the default config file
pub fn write_config(path: &Path) -> Result<()> {
    fs::write(path, generate_config_template())
        .with_context(|| format!("Failed to write config file '{}'", path.display()))
}

/// Write .gitignore and .ignore files with compiled PDFs and OS clutter
pub fn write_ignore_files(root: &Path) -> Result<()> {
    let content = ["*.pdf", ".DS_Store"].join("\n");

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        // Only create if doesn't exist (don't overwrite user's ignore files)
        if !path.exists() {
            fs::write(&path, &content)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
        }
    }

    Ok(())
}

/// Copy built-in templates into the templates directory for editing.
///
/// Returns how many were written; existing files are kept.
pub fn write_templates(templates_dir: &Path) -> Result<usize> {
    let mut written = 0;
    for (name, template) in BUILTIN {
        let path = templates_dir.join(format!("{name}.typ"));
        if !path.exists() {
            fs::write(&path, template.content())
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            written += 1;
        }
    }
    Ok(written)
}
