//! Creating note files from templates.
//!
//! A [`NoteDraft`] collects the values for a new note. [`render_note`]
//! resolves its template and target path, [`create_note`] writes it without
//! ever replacing an existing file.

mod filename;
mod slug;

pub use filename::{FilenameParts, FilenamePattern, PLACEHOLDERS};
pub use slug::slugify;

use crate::config::NoteConfig;
use crate::embed::note::{NoteVars, builtin};
use crate::embed::{Template, builtin_names};
use crate::metadata::{DEFAULT_STATUS, DEFAULT_TYPE};
use crate::utils::date::NoteDate;
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Upper bound on `-N` suffixes tried for a free filename.
const MAX_SUFFIX: usize = 999;

#[derive(Debug, Error)]
pub enum NoteError {
    #[error("unknown template `{name}` (available: {available})")]
    UnknownTemplate { name: String, available: String },

    #[error("invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("no free filename for `{0}`")]
    Exists(PathBuf),
}

/// Values for a note that is about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub kind: String,
    pub status: String,
    pub date: NoteDate,
    pub tags: Vec<String>,
    pub template: String,
}

impl NoteDraft {
    /// Draft with every field defaulted.
    pub fn new(config: &NoteConfig, today: NoteDate) -> Self {
        Self {
            title: "untitled".to_string(),
            kind: DEFAULT_TYPE.to_string(),
            status: DEFAULT_STATUS.to_string(),
            date: today,
            tags: Vec::new(),
            template: config.templates.default.clone(),
        }
    }

    /// Parse and set a `YYYY-MM-DD` date.
    pub fn set_date(&mut self, date: &str) -> Result<(), NoteError> {
        self.date = NoteDate::parse(date).ok_or_else(|| NoteError::InvalidDate(date.to_string()))?;
        Ok(())
    }

    /// Set tags, dropping blanks.
    pub fn set_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = tags
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
    }

    fn vars(&self) -> NoteVars {
        NoteVars {
            title: self.title.clone(),
            kind: self.kind.clone(),
            status: self.status.clone(),
            date: self.date.to_string(),
            tags: self.tags.clone(),
        }
    }

    /// File stem from `notes.filename`.
    pub fn file_stem(&self, config: &NoteConfig) -> Result<String> {
        let notes = &config.notes;
        let date = self.date.format(&notes.date_format);
        let slug = slugify(&self.title, notes.separator.as_char());
        let parts = FilenameParts {
            date: &date,
            slug: &slug,
            title: &self.title,
            kind: &self.kind,
        };
        Ok(notes.pattern()?.render(&parts))
    }
}

/// Resolve a template: `<templates.dir>/<name>.typ`, then the built-ins.
pub fn load_template(name: &str, templates_dir: &Path) -> Result<Template<NoteVars>> {
    let path = templates_dir.join(format!("{name}.typ"));
    if path.is_file() {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read template {}", path.display()))?;
        return Ok(Template::from_string(content));
    }

    builtin(name).ok_or_else(|| {
        NoteError::UnknownTemplate {
            name: name.to_string(),
            available: available_templates(templates_dir).join(", "),
        }
        .into()
    })
}

/// User templates followed by built-ins not shadowed by them.
pub fn available_templates(templates_dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(templates_dir)
        .into_iter()
        .flatten()
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if path.extension()? != "typ" {
                return None;
            }
            path.file_stem()?.to_str().map(str::to_string)
        })
        .collect();
    names.sort();

    for builtin in builtin_names() {
        if !names.iter().any(|n| n == builtin) {
            names.push(builtin.to_string());
        }
    }
    names
}

/// A rendered note and the path it would be written to.
#[derive(Debug, Clone)]
pub struct RenderedNote {
    /// Target before collision handling.
    pub path: PathBuf,
    pub content: String,
}

pub fn render_note(draft: &NoteDraft, config: &NoteConfig) -> Result<RenderedNote> {
    let template = load_template(&draft.template, &config.templates.dir)?;
    let stem = draft.file_stem(config)?;
    let path = config
        .notes
        .dir
        .join(format!("{stem}.{}", config.notes.extension()));

    Ok(RenderedNote {
        path,
        content: template.render(&draft.vars()),
    })
}

/// Write a new note and return its path.
///
/// An existing file is never overwritten: `-1`, `-2`, ... is appended to
/// the stem until a free name is found.
pub fn create_note(draft: &NoteDraft, config: &NoteConfig) -> Result<PathBuf> {
    let rendered = render_note(draft, config)?;
    let dir = rendered.path.parent().unwrap_or(config.notes.dir.as_path());
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    for suffix in 0..=MAX_SUFFIX {
        let path = with_suffix(&rendered.path, suffix);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(rendered.content.as_bytes())
                    .with_context(|| format!("failed to write {}", path.display()))?;
                return Ok(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => {
                return Err(e).with_context(|| format!("failed to create {}", path.display()));
            }
        }
    }
    Err(NoteError::Exists(rendered.path).into())
}

/// `dir/stem.ext` → `dir/stem-N.ext` (unchanged for 0).
fn with_suffix(path: &Path, suffix: usize) -> PathBuf {
    if suffix == 0 {
        return path.to_path_buf();
    }
    let stem = path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}-{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}-{suffix}"),
    };
    path.with_file_name(name)
}
