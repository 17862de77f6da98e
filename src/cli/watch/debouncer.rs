//! Event debouncing for watch mode.
//!
//! Editors save in bursts (write temp file, rename, touch metadata). The
//! debouncer folds a burst into one change per path and holds it until
//! the burst is over and the previous compile round has cooled down.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use notify::EventKind;
use notify::event::ModifyKind;
use rustc_hash::FxHashMap;

use crate::cli::common::is_temp_file;
use crate::debug;
use crate::utils::path::normalize_path;

pub(super) const DEBOUNCE_MS: u64 = 300;
pub(super) const COMPILE_COOLDOWN_MS: u64 = 800;

/// What happened to a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ChangeKind {
    Created,
    Modified,
    Removed,
}

impl ChangeKind {
    pub(super) fn label(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Modified => "modified",
            Self::Removed => "removed",
        }
    }
}

pub(super) struct Debouncer {
    /// One pending change per path
    changes: FxHashMap<PathBuf, ChangeKind>,
    last_event: Option<Instant>,
    last_compile: Option<Instant>,
}

impl Debouncer {
    pub(super) fn new() -> Self {
        Self {
            changes: FxHashMap::default(),
            last_event: None,
            last_compile: None,
        }
    }

    /// Record a notify event.
    ///
    /// - Removed then Created/Modified: the file is back, keep the new kind
    /// - Modified then Removed: Removed
    /// - Created then Removed: nothing happened
    /// - otherwise the first event wins
    pub(super) fn add_event(&mut self, event: &notify::Event) {
        let kind = match event.kind {
            EventKind::Create(_) => ChangeKind::Created,
            EventKind::Remove(_) => ChangeKind::Removed,
            // mtime/chmod noise, often caused by our own compile
            EventKind::Modify(ModifyKind::Metadata(_)) => return,
            EventKind::Modify(_) => ChangeKind::Modified,
            _ => return,
        };

        for path in &event.paths {
            if is_temp_file(path) {
                continue;
            }
            self.record(normalize_path(path), kind);
        }
    }

    fn record(&mut self, path: PathBuf, kind: ChangeKind) {
        match self.changes.get(&path).copied() {
            None => {
                debug!("watch"; "event {}: {}", kind.label(), path.display());
                self.changes.insert(path, kind);
            }
            Some(ChangeKind::Removed) if kind != ChangeKind::Removed => {
                self.changes.insert(path, kind);
            }
            Some(ChangeKind::Modified) if kind == ChangeKind::Removed => {
                self.changes.insert(path, ChangeKind::Removed);
            }
            Some(ChangeKind::Created) if kind == ChangeKind::Removed => {
                self.changes.remove(&path);
                if self.changes.is_empty() {
                    self.last_event = None;
                }
                return;
            }
            Some(_) => return,
        }
        self.last_event = Some(Instant::now());
    }

    /// Pending changes, once debounce and cooldown have both elapsed.
    pub(super) fn take_if_ready(&mut self) -> Option<Vec<(PathBuf, ChangeKind)>> {
        if self.changes.is_empty() {
            self.last_event = None;
            return None;
        }
        if !self.is_ready() {
            return None;
        }

        let changes = std::mem::take(&mut self.changes);
        self.last_event = None;
        self.last_compile = Some(Instant::now());

        let mut changes: Vec<_> = changes.into_iter().collect();
        changes.sort_by(|a, b| a.0.cmp(&b.0));
        Some(changes)
    }

    pub(super) fn is_ready(&self) -> bool {
        let Some(last_event) = self.last_event else {
            return false;
        };

        if last_event.elapsed() < Duration::from_millis(DEBOUNCE_MS) {
            return false;
        }

        if let Some(last_compile) = self.last_compile
            && last_compile.elapsed() < Duration::from_millis(COMPILE_COOLDOWN_MS)
        {
            return false;
        }

        !self.changes.is_empty()
    }

    /// How long the watch loop may sleep before the next check.
    pub(super) fn sleep_duration(&self) -> Duration {
        let Some(last_event) = self.last_event else {
            return Duration::from_secs(86400);
        };

        let debounce_remaining =
            Duration::from_millis(DEBOUNCE_MS).saturating_sub(last_event.elapsed());

        let cooldown_remaining = self
            .last_compile
            .map(|t| Duration::from_millis(COMPILE_COOLDOWN_MS).saturating_sub(t.elapsed()))
            .unwrap_or(Duration::ZERO);

        debounce_remaining
            .max(cooldown_remaining)
            .max(Duration::from_millis(1))
    }

    #[cfg(test)]
    fn pending(&self, path: &std::path::Path) -> Option<ChangeKind> {
        self.changes.get(path).copied()
    }
}
