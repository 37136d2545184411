//! Recursive vault traversal helpers.
//!
//! # Responsibility
//! - List markdown notes, subdirectories and plain file counts under a root.
//! - Locate an asset by exact base name.
//!
//! # Invariants
//! - Traversal is read-only.
//! - Within each directory, files are visited before subdirectories, each
//!   group in file-name order; a directory's own files win name lookups over
//!   deeper matches.
//! - A missing root or unreadable entry never fails the walk; it is skipped
//!   and reported via `warn!`.

use log::warn;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Extension (with dot) that marks a markdown note.
pub const MARKDOWN_SUFFIX: &str = ".md";

fn walk(root: &Path) -> impl Iterator<Item = DirEntry> {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by(|a, b| {
            b.file_type()
                .is_file()
                .cmp(&a.file_type().is_file())
                .then_with(|| a.file_name().cmp(b.file_name()))
        })
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(
                    "event=walk_entry module=walker status=skip path={} error={}",
                    err.path()
                        .map(|path| path.display().to_string())
                        .unwrap_or_else(|| "unknown".to_string()),
                    err
                );
                None
            }
        })
}

/// Collects every file under `root` whose name ends with `.md`.
pub fn collect_markdown_files(root: impl AsRef<Path>) -> Vec<PathBuf> {
    walk(root.as_ref())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .ends_with(MARKDOWN_SUFFIX)
        })
        .map(DirEntry::into_path)
        .collect()
}

/// Counts every file under `root`. Directories are not counted.
pub fn count_files(root: impl AsRef<Path>) -> usize {
    walk(root.as_ref())
        .filter(|entry| entry.file_type().is_file())
        .count()
}

/// Lists every directory strictly below `root`, depth-first.
pub fn list_subdirectories(root: impl AsRef<Path>) -> Vec<PathBuf> {
    walk(root.as_ref())
        .filter(|entry| entry.depth() > 0 && entry.file_type().is_dir())
        .map(DirEntry::into_path)
        .collect()
}

/// Returns the first file under `root` whose base name equals `name`.
pub fn find_file_by_name(root: impl AsRef<Path>, name: &str) -> Option<PathBuf> {
    let wanted = OsStr::new(name);
    walk(root.as_ref())
        .find(|entry| entry.file_type().is_file() && entry.file_name() == wanted)
        .map(DirEntry::into_path)
}
