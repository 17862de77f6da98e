//! PDF compilation through `typst compile`.
//!
//! ```text
//! typst --color never compile --root <root> [--font-path P]... <note> <pdf>
//! ```

mod viewer;

pub use viewer::open_pdf;

use crate::config::NoteConfig;
use crate::utils::exec::{Cmd, CommandRunner, SystemRunner};
use anyhow::{Context, Result, bail};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// Compiles notes with the configured typst binary.
pub struct Compiler<'a, R = SystemRunner> {
    config: &'a NoteConfig,
    runner: R,
}

impl<'a> Compiler<'a, SystemRunner> {
    pub fn new(config: &'a NoteConfig) -> Self {
        Self::with_runner(config, SystemRunner)
    }
}

impl<'a, R: CommandRunner> Compiler<'a, R> {
    pub fn with_runner(config: &'a NoteConfig, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Where the PDF for `note` goes.
    ///
    /// An explicit output wins, then `pdf.output_dir/<stem>.pdf`, then the
    /// note's own path with a `.pdf` extension.
    pub fn output_path(&self, note: &Path, explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        match &self.config.pdf.output_dir {
            Some(dir) => {
                let stem = note.file_stem().unwrap_or(OsStr::new("note"));
                dir.join(format!("{}.pdf", stem.to_string_lossy()))
            }
            None => note.with_extension("pdf"),
        }
    }

    pub fn command(&self, note: &Path, pdf: &Path) -> Cmd {
        let typst = &self.config.typst;
        Cmd::new(&typst.command)
            .args(["--color", "never", "compile", "--root"])
            .arg(&typst.root)
            .args(typst.font_args())
            .arg(note)
            .arg(pdf)
    }

    /// Compile `note` and return the written PDF path.
    pub fn compile(&self, note: &Path, explicit: Option<&Path>) -> Result<PathBuf> {
        let program = &self.config.typst.command;
        if !self.runner.is_available(OsStr::new(program)) {
            bail!("`{program}` not found in PATH, install typst or set `typst.command`");
        }

        let pdf = self.output_path(note, explicit);
        if let Some(parent) = pdf.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let output = self.runner.run(&self.command(note, &pdf))?;
        if !output.success() {
            bail!(output.failure_message(program));
        }
        Ok(pdf)
    }
}
