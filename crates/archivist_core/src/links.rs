//! Wiki link extraction.
//!
//! # Responsibility
//! - Pull asset names out of `[[name]]`, `![[name]]` and `[[name|alias]]`
//!   references in markdown text.
//!
//! # Invariants
//! - Output order follows text order; duplicates are preserved.
//! - Aliases after `|` are never part of a returned name.
//! - No existence check is performed on returned names.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::io;
use std::path::Path;

static WIKI_LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"!?\[\[([^|\]]+)(?:\|[^\]]*)?\]\]").expect("valid wiki link regex")
});

/// Reads one markdown file as UTF-8 and returns its wiki link targets.
///
/// # Errors
/// - Returns the underlying I/O error when the file cannot be read.
/// - Returns `InvalidData` when the file is not valid UTF-8.
pub fn extract_wiki_links(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(extract_wiki_links_from_str(&content))
}

/// Returns every wiki link target found in `text`.
pub fn extract_wiki_links_from_str(text: &str) -> Vec<String> {
    WIKI_LINK_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|target| target.as_str().to_string())
        .collect()
}
