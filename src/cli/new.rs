//! `typnote new`: create a note from a template.

use anyhow::Result;

use crate::cli::NewArgs;
use crate::config::NoteConfig;
use crate::log;
use crate::note::{NoteDraft, render_note};
use crate::notebook::Notebook;
use crate::utils::date::NoteDate;
use crate::utils::path::display_relative;

pub fn new_note(config: &NoteConfig, args: &NewArgs) -> Result<()> {
    let draft = draft_from_args(config, args, NoteDate::today())?;

    if args.dry {
        let rendered = render_note(&draft, config)?;
        println!("{}", rendered.path.display());
        println!();
        print!("{}", rendered.content);
        return Ok(());
    }

    let mut notebook = Notebook::new(config.clone());
    let path = notebook.create_note(&draft)?;

    log!("new"; "created {}", display_relative(&path, &config.root));
    println!("{}", path.display());
    Ok(())
}

/// Build a draft from command-line values, defaulting the rest.
fn draft_from_args(config: &NoteConfig, args: &NewArgs, today: NoteDate) -> Result<NoteDraft> {
    let mut draft = NoteDraft::new(config, today);

    if let Some(title) = args.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        draft.title = title.to_string();
    }
    if let Some(template) = &args.template {
        draft.template = template.clone();
    }
    if let Some(kind) = &args.kind {
        draft.kind = kind.clone();
    }
    if let Some(status) = &args.status {
        draft.status = status.clone();
    }
    if let Some(date) = &args.date {
        draft.set_date(date)?;
    }
    draft.set_tags(&args.tags);

    Ok(draft)
}
