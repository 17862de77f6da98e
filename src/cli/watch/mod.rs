//! `typnote watch`: recompile notes as they change.
//!
//! ```text
//! notify watcher ─→ channel ─→ Debouncer ─→ compile ─→ WatchStatus
//! ```
//!
//! The watcher starts before the loop so edits made while it spins up are
//! buffered rather than lost. Ctrl+C ends the loop through a second channel.

mod debouncer;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use crossbeam::channel::{self, Receiver, Sender};
use notify::{RecursiveMode, Watcher};

use crate::cli::common::has_extension;
use crate::compiler::Compiler;
use crate::config::NoteConfig;
use crate::logger::{status_error, status_info, status_success};
use crate::notebook::Notebook;
use crate::utils::exec::CommandRunner;
use crate::utils::path::{display_relative, resolve_path};
use crate::{debug, log};

use debouncer::{ChangeKind, Debouncer};

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Wakes the watch loop on shutdown
static SHUTDOWN_TX: OnceLock<Sender<()>> = OnceLock::new();

pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

/// Install the Ctrl+C handler and return the channel it signals.
fn setup_shutdown_handler() -> Result<Receiver<()>> {
    let (tx, rx) = channel::bounded(1);
    SHUTDOWN_TX
        .set(tx)
        .map_err(|_| anyhow::anyhow!("shutdown handler already installed"))?;

    ctrlc::set_handler(|| {
        SHUTDOWN.store(true, Ordering::SeqCst);
        if let Some(tx) = SHUTDOWN_TX.get() {
            let _ = tx.try_send(());
        }
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))?;

    Ok(rx)
}

pub fn watch_notes(config: &NoteConfig, paths: &[PathBuf]) -> Result<()> {
    let mut notebook = Notebook::new(config.clone());
    notebook.initialize()?;

    let roots = watch_roots(paths, &config.notes.dir)?;
    let shutdown_rx = setup_shutdown_handler()?;

    let (event_tx, event_rx) = channel::unbounded();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        let _ = event_tx.send(res); // receiver dropped on shutdown
    })
    .context("Failed to create file watcher")?;

    for root in &roots {
        let mode = if root.is_dir() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        watcher
            .watch(root, mode)
            .with_context(|| format!("Failed to watch '{}'", root.display()))?;
        debug!("watch"; "watching {}", root.display());
    }

    log!(
        "watch";
        "watching {} (Ctrl+C to stop)",
        roots
            .iter()
            .map(|r| display_relative(r, &config.root))
            .collect::<Vec<_>>()
            .join(", ")
    );

    let compiler = notebook.compiler();
    let mut debouncer = Debouncer::new();

    loop {
        let stop = channel::select! {
            recv(event_rx) -> msg => match msg {
                Ok(Ok(event)) => {
                    debouncer.add_event(&event);
                    false
                }
                Ok(Err(e)) => {
                    log!("watch"; "notify error: {}", e);
                    false
                }
                Err(_) => true,
            },
            recv(shutdown_rx) -> _ => true,
            default(debouncer.sleep_duration()) => false,
        };

        if stop || is_shutdown() {
            break;
        }

        if let Some(changes) = debouncer.take_if_ready() {
            process_changes(&compiler, &changes, config);
        }
    }

    log!("watch"; "stopped");
    Ok(())
}

/// Resolve CLI paths against the notes directory; default to the notes directory.
fn watch_roots(paths: &[PathBuf], notes_dir: &Path) -> Result<Vec<PathBuf>> {
    if paths.is_empty() {
        return Ok(vec![notes_dir.to_path_buf()]);
    }

    paths
        .iter()
        .map(|path| {
            let resolved = resolve_path(path, notes_dir);
            if resolved.exists() {
                Ok(resolved)
            } else {
                anyhow::bail!("Path not found: {}", path.display())
            }
        })
        .collect()
}

/// Compile every created or modified note, reporting each result.
fn process_changes<R: CommandRunner>(
    compiler: &Compiler<'_, R>,
    changes: &[(PathBuf, ChangeKind)],
    config: &NoteConfig,
) {
    let extension = config.notes.extension();

    for (path, kind) in changes {
        if !has_extension(path, extension) {
            continue;
        }
        let shown = display_relative(path, &config.root);

        match kind {
            ChangeKind::Removed => status_info(&format!("removed {shown}")),
            ChangeKind::Created | ChangeKind::Modified => {
                if !path.is_file() {
                    continue;
                }
                match compiler.compile(path, None) {
                    Ok(_) => status_success(&format!("compiled {shown}")),
                    Err(e) => status_error(&format!("failed: {shown}"), &format!("{e:#}")),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::exec::testing::RecordingRunner;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_watch_roots() {
        let dir = TempDir::new().unwrap();
        let notes = dir.path().join("notes");
        fs::create_dir_all(notes.join("work")).unwrap();

        assert_eq!(watch_roots(&[], &notes).unwrap(), vec![notes.clone()]);

        let roots = watch_roots(&[PathBuf::from("work")], &notes).unwrap();
        assert!(roots[0].ends_with("work"));

        assert!(watch_roots(&[PathBuf::from("nope")], &notes).is_err());
    }

    #[test]
    fn test_process_changes_compiles_notes_only() {
        let dir = TempDir::new().unwrap();
        let config = NoteConfig::with_root(dir.path());
        fs::create_dir_all(&config.notes.dir).unwrap();

        let note = config.notes.dir.join("a.typ");
        fs::write(&note, "= A").unwrap();
        let pdf = config.notes.dir.join("a.pdf");
        let gone = config.notes.dir.join("gone.typ");

        let compiler = Compiler::with_runner(&config, RecordingRunner::new(true, 0, ""));
        process_changes(
            &compiler,
            &[
                (note, ChangeKind::Modified),
                (pdf, ChangeKind::Created),
                (gone.clone(), ChangeKind::Modified),
                (gone, ChangeKind::Removed),
            ],
            &config,
        );

        let commands = compiler.runner().commands();
        assert_eq!(commands.len(), 1);
        assert!(commands[0].contains("a.typ"));
    }
}
