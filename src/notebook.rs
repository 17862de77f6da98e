//! The notebook: a loaded configuration plus its on-disk layout.
//!
//! Commands that touch the notes directory go through [`Notebook`], which
//! makes sure the directories exist exactly once per process.

use crate::compiler::Compiler;
use crate::config::NoteConfig;
use crate::debug;
use crate::metadata::MetadataQuery;
use crate::note::{self, NoteDraft};
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub struct Notebook {
    config: NoteConfig,
    initialized: bool,
}

impl Notebook {
    pub fn new(config: NoteConfig) -> Self {
        Self {
            config,
            initialized: false,
        }
    }

    pub fn config(&self) -> &NoteConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Create the notes and templates directories.
    ///
    /// Runs once; later calls return `Ok(false)` without touching the disk.
    pub fn initialize(&mut self) -> Result<bool> {
        if self.initialized {
            return Ok(false);
        }

        for dir in [&self.config.notes.dir, &self.config.templates.dir] {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory '{}'", dir.display()))?;
        }
        debug!("init"; "notebook ready at {}", self.config.root.display());

        self.initialized = true;
        Ok(true)
    }

    pub fn metadata(&self) -> MetadataQuery {
        MetadataQuery::from_config(&self.config.typst)
    }

    pub fn compiler(&self) -> Compiler<'_> {
        Compiler::new(&self.config)
    }

    /// Initialize if needed, then write the note.
    pub fn create_note(&mut self, draft: &NoteDraft) -> Result<PathBuf> {
        self.initialize()?;
        note::create_note(draft, &self.config)
    }
}
