//! `typnote list`: metadata for every note, filtered and sorted.
//!
//! Queries run in parallel with one `typst query` per note. Notes without
//! usable metadata still show up with their defaulted record.

mod collect;
mod output;

use anyhow::Result;

use crate::cli::ListArgs;
use crate::cli::common::collect_note_files;
use crate::config::NoteConfig;
use crate::log;
use crate::notebook::Notebook;
use crate::utils::date::NoteDate;
use crate::utils::plural_count;

pub use collect::{ListFilter, ListedNote};

pub fn list_notes(config: &NoteConfig, args: &ListArgs) -> Result<()> {
    let notes_dir = &config.notes.dir;
    let files = collect_note_files(&args.paths, notes_dir, config.notes.extension())?;
    if files.is_empty() {
        log!("list"; "no notes in {}", notes_dir.display());
        return Ok(());
    }

    let notebook = Notebook::new(config.clone());
    let query = notebook.metadata();
    let mut notes = collect::query_notes(&files, &query, notes_dir, NoteDate::today());

    let filter = ListFilter::from_args(args);
    notes.retain(|note| filter.matches(note));
    collect::sort_notes(&mut notes);

    crate::debug!("list"; "{} after filtering", plural_count(notes.len(), "note"));

    if args.json {
        println!("{}", output::format_json(&notes, args.pretty)?);
    } else if !notes.is_empty() {
        print!("{}", output::format_table(&notes));
    }
    Ok(())
}
