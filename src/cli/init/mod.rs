//! Notebook initialization module.
//!
//! # Module Structure
//!
//! - [`validate`]: Pre-initialization validation
//! - [`config`]: Configuration file and template generation

mod config;
mod validate;

use crate::{config::NoteConfig, log, notebook::Notebook, utils::plural_count};
use anyhow::Result;

pub use validate::InitMode;

/// Create a new notebook
///
/// # Steps
/// 1. Validate target directory
/// 2. Create notes and templates directories
/// 3. Write configuration, ignore files and templates
///
/// If `dry_run` is true, only prints the config template to stdout
pub fn new_notebook(config: &NoteConfig, has_name: bool, dry_run: bool) -> Result<()> {
    if dry_run {
        print!("{}", config::generate_config_template());
        return Ok(());
    }

    let mode = if has_name {
        InitMode::NewDir
    } else {
        InitMode::CurrentDir
    };
    validate::validate_target(&config.root, &config.config_path, mode)?;

    let mut notebook = Notebook::new(config.clone());
    notebook.initialize()?;

    config::write_config(&config.config_path)?;
    config::write_ignore_files(&config.root)?;
    let written = config::write_templates(&config.templates.dir)?;

    log!(
        "init";
        "notebook initialized at {} ({})",
        config.root.display(),
        plural_count(written, "template")
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_new_notebook_layout() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("kb");
        let config = NoteConfig::with_root(&root);

        new_notebook(&config, true, false).unwrap();

        assert!(config.config_path.is_file());
        assert!(config.notes.dir.is_dir());
        assert!(config.templates.dir.join("note.typ").is_file());
        assert!(config.templates.dir.join("daily.typ").is_file());
        assert!(root.join(".gitignore").is_file());

        let written = fs::read_to_string(&config.config_path).unwrap();
        assert!(written.contains("[notes]"));
    }

    #[test]
    fn test_init_twice_fails() {
        let dir = TempDir::new().unwrap();
        let config = NoteConfig::with_root(dir.path());
        new_notebook(&config, false, false).unwrap();
        assert!(new_notebook(&config, false, false).is_err());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let config = NoteConfig::with_root(dir.path());
        new_notebook(&config, false, true).unwrap();
        assert!(!config.config_path.exists());
        assert!(!config.notes.dir.exists());
    }
}
