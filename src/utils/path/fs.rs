//! Path normalization utilities.
//!
//! Provides consistent path handling across the codebase:
//! - `normalize_path` - file system paths (canonicalize + fallback)
//! - `resolve_path` - resolve relative paths with fallback directory
//! - `expand_path` - `~` expansion relative to a root

use std::path::{Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Resolve a path that may be relative to cwd or a fallback directory.
///
/// Tries in order:
/// 1. If absolute, use as-is
/// 2. If exists relative to cwd, normalize to absolute
/// 3. Otherwise, resolve relative to fallback_dir
///
/// # Example
/// ```ignore
/// // User passes "2024-06-15-standup.typ", fallback is the notes dir
/// let resolved = resolve_path(Path::new("2024-06-15-standup.typ"), notes_dir);
/// ```
#[inline]
pub fn resolve_path(path: &Path, fallback_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }

    if path.exists() {
        return normalize_path(path);
    }

    normalize_path(&fallback_dir.join(path))
}

/// Expand a leading `~` and anchor relative paths at `root`.
pub fn expand_path(path: &Path, root: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
    let path = PathBuf::from(expanded);
    let full_path = if path.is_relative() {
        root.join(&path)
    } else {
        path
    };
    normalize_path(&full_path)
}

/// Display `path` relative to `base` when possible.
pub fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}
