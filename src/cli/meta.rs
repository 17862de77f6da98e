//! `typnote meta`: print the metadata of a single note.

use anyhow::{Result, bail};

use crate::cli::MetaArgs;
use crate::config::NoteConfig;
use crate::log;
use crate::metadata::{Fallback, MetadataRecord};
use crate::notebook::Notebook;
use crate::utils::date::NoteDate;
use crate::utils::path::resolve_path;

pub fn show_meta(config: &NoteConfig, args: &MetaArgs) -> Result<()> {
    let path = resolve_path(&args.file, &config.notes.dir);
    if !path.is_file() {
        bail!("Note not found: {}", args.file.display());
    }

    let notebook = Notebook::new(config.clone());
    let today = NoteDate::today();
    let record = match notebook.metadata().query(&path, today) {
        Some(record) => record,
        None => {
            log!(
                "hint";
                "no metadata from {}, showing defaults (add `#metadata(..)` to the note or check that `{}` runs)",
                path.display(),
                config.typst.command
            );
            MetadataRecord::defaults(&Fallback::for_path(&path, today))
        }
    };

    if args.json {
        let json = if args.pretty {
            serde_json::to_string_pretty(&record)?
        } else {
            serde_json::to_string(&record)?
        };
        println!("{json}");
    } else {
        print!("{}", format_fields(&record));
    }
    Ok(())
}

/// One `key: value` line per field.
fn format_fields(record: &MetadataRecord) -> String {
    let fields = [
        ("title", record.title.clone()),
        ("type", record.kind.clone()),
        ("status", record.status.clone()),
        ("date", record.date.clone()),
        ("tags", record.tags.join(", ")),
    ];

    fields
        .iter()
        .map(|(key, value)| format!("{key:>6}: {value}\n"))
        .collect()
}
