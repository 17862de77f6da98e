//! Common utilities shared across CLI commands.

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use crossbeam::queue::SegQueue;
use jwalk::WalkDir;

use crate::utils::path::resolve_path;

/// Lock-free parallel result collector using `SegQueue`
pub struct ParallelCollector<T> {
    queue: SegQueue<T>,
}

impl<T> ParallelCollector<T> {
    #[inline]
    pub fn new() -> Self {
        Self {
            queue: SegQueue::new(),
        }
    }

    #[inline]
    pub fn push(&self, item: T) {
        self.queue.push(item);
    }

    /// Drain all items with pre-allocated capacity.
    pub fn drain_with_capacity(self, capacity: usize) -> Vec<T> {
        let mut results = Vec::with_capacity(capacity);
        while let Some(item) = self.queue.pop() {
            results.push(item);
        }
        results
    }
}

impl<T> Default for ParallelCollector<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Collect note files based on CLI paths.
///
/// With no paths the whole notes directory is walked. A single `-` reads
/// paths from stdin.
pub fn collect_note_files(
    paths: &[PathBuf],
    notes_dir: &Path,
    extension: &str,
) -> Result<Vec<PathBuf>> {
    let paths: Vec<PathBuf> = if paths.len() == 1 && paths[0].as_os_str() == "-" {
        read_paths_from_stdin()?
    } else {
        paths.to_vec()
    };

    if paths.is_empty() {
        return Ok(walk_notes(notes_dir, extension));
    }

    let mut files = Vec::new();
    for path in &paths {
        let resolved = resolve_path(path, notes_dir);

        if resolved.is_file() {
            if has_extension(&resolved, extension) {
                files.push(resolved);
            } else {
                bail!("Not a .{} note: {}", extension, path.display());
            }
        } else if resolved.is_dir() {
            files.extend(walk_notes(&resolved, extension));
        } else {
            bail!(
                "Path not found: {}\n  Tried:\n    - {}\n    - {}",
                path.display(),
                path.display(),
                notes_dir.join(path).display()
            );
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Every note under `dir`, sorted, skipping hidden entries and editor temp files.
pub fn walk_notes(dir: &Path, extension: &str) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .skip_hidden(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|p| has_extension(p, extension) && !is_temp_file(p))
        .collect();
    files.sort();
    files
}

/// Read file paths from stdin, one per line
pub fn read_paths_from_stdin() -> Result<Vec<PathBuf>> {
    let stdin = io::stdin();
    let mut paths = Vec::new();

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            paths.push(PathBuf::from(trimmed));
        }
    }

    Ok(paths)
}

pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|e| e == extension)
}

/// Check if path is a temp/backup file (editor artifacts).
pub fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}
