//! `typnote compile`: render a note to PDF.

use anyhow::Result;

use crate::cli::CompileArgs;
use crate::compiler::open_pdf;
use crate::config::NoteConfig;
use crate::log;
use crate::notebook::Notebook;
use crate::utils::path::{display_relative, resolve_path};

pub fn compile_note(config: &NoteConfig, args: &CompileArgs) -> Result<()> {
    let notebook = Notebook::new(config.clone());
    let note = resolve_path(&args.file, &config.notes.dir);
    if !note.is_file() {
        anyhow::bail!("Note not found: {}", args.file.display());
    }

    let pdf = notebook.compiler().compile(&note, args.output.as_deref())?;
    log!(
        "compile";
        "{} -> {}",
        display_relative(&note, &config.root),
        display_relative(&pdf, &config.root)
    );

    if args.open {
        open_pdf(&config.pdf, &pdf)?;
    }
    Ok(())
}
