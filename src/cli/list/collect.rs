use std::cmp::Reverse;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;

use crate::cli::ListArgs;
use crate::cli::common::ParallelCollector;
use crate::logger::ProgressLine;
use crate::metadata::{MetadataQuery, MetadataRecord};
use crate::utils::date::NoteDate;
use crate::utils::exec::CommandRunner;
use crate::utils::path::display_relative;

/// A listed note: its path relative to the notes directory plus metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedNote {
    pub path: String,
    #[serde(flatten)]
    pub record: MetadataRecord,
}

/// Exact-match filters; unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub tag: Option<String>,
    pub status: Option<String>,
    pub kind: Option<String>,
}

impl ListFilter {
    pub fn from_args(args: &ListArgs) -> Self {
        Self {
            tag: args.tag.clone(),
            status: args.status.clone(),
            kind: args.kind.clone(),
        }
    }

    pub fn matches(&self, note: &ListedNote) -> bool {
        let record = &note.record;
        self.tag.as_deref().is_none_or(|tag| record.has_tag(tag))
            && self.status.as_deref().is_none_or(|s| record.status == s)
            && self.kind.as_deref().is_none_or(|k| record.kind == k)
    }
}

pub(super) fn query_notes<R: CommandRunner>(
    files: &[PathBuf],
    query: &MetadataQuery<R>,
    notes_dir: &Path,
    today: NoteDate,
) -> Vec<ListedNote> {
    let progress = ProgressLine::new("list", &[("notes", files.len())]);
    let collector = ParallelCollector::new();

    files.par_iter().for_each(|file| {
        collector.push(ListedNote {
            path: display_relative(file, notes_dir),
            record: query.query_or_default(file, today),
        });
        progress.inc("notes");
    });

    progress.finish();
    collector.drain_with_capacity(files.len())
}

/// Newest first; same-day notes by title, then path.
pub(super) fn sort_notes(notes: &mut [ListedNote]) {
    notes.sort_by(|a, b| {
        Reverse(&a.record.date)
            .cmp(&Reverse(&b.record.date))
            .then_with(|| a.record.title.cmp(&b.record.title))
            .then_with(|| a.path.cmp(&b.path))
    });
}

#[cfg(test)]
pub(super) fn note(path: &str, title: &str, date: &str, tags: &[&str]) -> ListedNote {
    ListedNote {
        path: path.to_string(),
        record: MetadataRecord {
            title: title.to_string(),
            kind: "document".to_string(),
            status: "draft".to_string(),
            date: date.to_string(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
        },
    }
}
