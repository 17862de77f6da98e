//! Pre-initialization validation.
//!
//! Validates target directory state before notebook creation.

use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Initialization mode determines validation rules.
#[derive(Debug, Clone, Copy)]
pub enum InitMode {
    /// `typnote init` - initialize in current directory (no config yet)
    CurrentDir,
    /// `typnote init <name>` - use a new or empty subdirectory
    NewDir,
}

/// Validate target directory for initialization.
///
/// # Rules
/// - `CurrentDir`: existing files are fine, an existing config is not
/// - `NewDir`: directory must be empty (or not exist)
pub fn validate_target(root: &Path, config_path: &Path, mode: InitMode) -> Result<()> {
    match mode {
        InitMode::CurrentDir => {
            if config_path.exists() {
                bail!(
                    "'{}' already exists.\n\
                     This directory is already a notebook.",
                    config_path.display()
                );
            }
        }
        InitMode::NewDir => {
            if !is_empty(root)? {
                bail!(
                    "Directory '{}' is not empty.\n\
                     Choose a different name or remove the existing directory.",
                    root.display()
                );
            }
        }
    }
    Ok(())
}

/// Check if directory is empty or doesn't exist.
fn is_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    let is_empty = fs::read_dir(path)
        .with_context(|| format!("Failed to read directory '{}'", path.display()))?
        .next()
        .is_none();
    Ok(is_empty)
}
