//! Running `typst query` for a note's metadata.
//!
//! ```text
//! typst --color never query --format json --root <root> <file> metadata
//! ```
//!
//! Every failure (missing binary, failed run, no payload, bad JSON, wrong
//! shape) is a [`MetadataError`]; [`MetadataQuery::query`] logs it in
//! verbose mode and reports "no metadata" as `None`.

use super::{DecoderChain, Fallback, MetadataRecord, find_json_region};
use crate::config::TypstConfig;
use crate::debug;
use crate::utils::date::NoteDate;
use crate::utils::exec::{Cmd, CommandRunner, SystemRunner};
use serde_json::Value;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a note has no metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("`{0}` not found in PATH")]
    BinaryMissing(String),

    #[error("typst query failed: {0}")]
    Invocation(String),

    #[error("no query result in typst output")]
    NoPayload,

    #[error("query result is not valid JSON")]
    Undecodable,

    #[error("query result is not an array")]
    UnexpectedShape,
}

/// Metadata lookup through `typst query`.
pub struct MetadataQuery<R = SystemRunner> {
    runner: R,
    program: String,
    root: PathBuf,
    decoders: DecoderChain,
}

impl MetadataQuery<SystemRunner> {
    pub fn from_config(config: &TypstConfig) -> Self {
        Self::with_runner(SystemRunner, &config.command, &config.root)
    }
}

impl<R: CommandRunner> MetadataQuery<R> {
    pub fn with_runner(runner: R, program: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            program: program.into(),
            root: root.into(),
            decoders: DecoderChain::default(),
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// The query command line for `path`.
    pub fn command(&self, path: &Path) -> Cmd {
        Cmd::new(&self.program)
            .args(["--color", "never", "query", "--format", "json", "--root"])
            .arg(&self.root)
            .arg(path)
            .arg("metadata")
    }

    /// Run the query and decode its result array.
    pub fn fetch(&self, path: &Path) -> Result<Value, MetadataError> {
        if !self.runner.is_available(OsStr::new(&self.program)) {
            return Err(MetadataError::BinaryMissing(self.program.clone()));
        }

        let output = self
            .runner
            .run(&self.command(path))
            .map_err(|e| MetadataError::Invocation(format!("{e:#}")))?;

        if !output.success() {
            return Err(MetadataError::Invocation(
                output.failure_message(&self.program),
            ));
        }

        let raw = output.text();
        let region = find_json_region(&raw).ok_or(MetadataError::NoPayload)?;
        let value = self
            .decoders
            .decode(region)
            .ok_or(MetadataError::Undecodable)?;

        if !value.is_array() {
            return Err(MetadataError::UnexpectedShape);
        }
        Ok(value)
    }

    /// Normalized metadata for `path`, or `None` when typst provides none.
    pub fn query(&self, path: &Path, today: NoteDate) -> Option<MetadataRecord> {
        match self.fetch(path) {
            Ok(value) => Some(MetadataRecord::normalize(
                Some(&value),
                &Fallback::for_path(path, today),
            )),
            Err(e) => {
                debug!("meta"; "{}: {}", path.display(), e);
                None
            }
        }
    }

    /// Like [`query`](Self::query), with the defaulted record instead of `None`.
    pub fn query_or_default(&self, path: &Path, today: NoteDate) -> MetadataRecord {
        self.query(path, today)
            .unwrap_or_else(|| MetadataRecord::defaults(&Fallback::for_path(path, today)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::exec::testing::RecordingRunner;

    const PAYLOAD: &str = r#"[{"func":"metadata","value":{"title":"My Note","tags":["a","b"]}}]"#;

    fn today() -> NoteDate {
        NoteDate::new(2024, 6, 15)
    }

    fn query_with(runner: RecordingRunner) -> MetadataQuery<RecordingRunner> {
        MetadataQuery::with_runner(runner, "typst", "/home/user")
    }

    #[test]
    fn test_command_line() {
        let q = query_with(RecordingRunner::new(true, 0, PAYLOAD));
        let expected = "typst --color never query --format json --root /home/user /tmp/note.typ metadata";
        assert_eq!(q.command(Path::new("/tmp/note.typ")).display(), expected);

        q.query(Path::new("/tmp/note.typ"), today());
        assert_eq!(q.runner().commands(), [expected]);
    }

    #[test]
    fn test_successful_query() {
        let q = query_with(RecordingRunner::new(true, 0, PAYLOAD));
        let record = q.query(Path::new("/tmp/note.typ"), today()).unwrap();

        assert_eq!(
            record,
            MetadataRecord {
                title: "My Note".into(),
                kind: "document".into(),
                status: "draft".into(),
                date: "2024-06-15".into(),
                tags: vec!["a".into(), "b".into()],
            }
        );
        assert_eq!(q.runner().calls(), 1);
    }

    #[test]
    fn test_missing_binary_never_spawns() {
        let q = query_with(RecordingRunner::new(false, 0, PAYLOAD));
        assert!(matches!(
            q.fetch(Path::new("/tmp/note.typ")),
            Err(MetadataError::BinaryMissing(ref p)) if p == "typst"
        ));
        assert!(q.query(Path::new("/tmp/note.typ"), today()).is_none());
        assert_eq!(q.runner().calls(), 0);
    }

    #[test]
    fn test_exit_status_ignores_output() {
        let q = query_with(RecordingRunner::new(true, 1, PAYLOAD));
        assert!(matches!(
            q.fetch(Path::new("/tmp/note.typ")),
            Err(MetadataError::Invocation(_))
        ));
        assert!(q.query(Path::new("/tmp/note.typ"), today()).is_none());
        assert_eq!(q.runner().calls(), 2);
    }

    #[test]
    fn test_no_payload() {
        let q = query_with(RecordingRunner::new(true, 0, "warning: foo\n"));
        assert!(matches!(
            q.fetch(Path::new("/tmp/note.typ")),
            Err(MetadataError::NoPayload)
        ));
    }

    #[test]
    fn test_undecodable_payload() {
        let q = query_with(RecordingRunner::new(true, 0, r#"[{"func" oops}]"#));
        assert!(matches!(
            q.fetch(Path::new("/tmp/note.typ")),
            Err(MetadataError::Undecodable)
        ));

        let record = q.query_or_default(Path::new("/tmp/note.typ"), today());
        assert_eq!(record.title, "note");
        assert_eq!(record.kind, "document");
        assert!(record.tags.is_empty());
    }

    #[test]
    fn test_payload_on_stderr() {
        let runner = RecordingRunner::new(true, 0, "").with_stderr(&format!("warning: unused\n{PAYLOAD}\n"));
        let q = query_with(runner);
        let record = q.query(Path::new("/tmp/note.typ"), today()).unwrap();
        assert_eq!(record.title, "My Note");
    }
}
