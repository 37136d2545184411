//! Append-only movement history.
//!
//! # Responsibility
//! - Persist one human-readable record per completed move.
//! - Give the operator a ready-to-paste rollback command for each move.
//!
//! # Invariants
//! - The log file is opened, appended and closed per record.
//! - Records are never read back or rewritten by this crate.
//! - Non-UTF-8 path bytes are replaced, never rejected.

use chrono::{DateTime, Local};
use log::{error, info};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// One completed asset move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub file_name: String,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub moved_at: DateTime<Local>,
}

impl MoveRecord {
    pub fn new(file_name: impl Into<String>, source: PathBuf, destination: PathBuf) -> Self {
        Self {
            file_name: file_name.into(),
            source,
            destination,
            moved_at: Local::now(),
        }
    }

    /// Shell command that moves the file back to where it came from.
    pub fn rollback_command(&self) -> String {
        format!(
            "mv {} {}",
            shell_quote(&self.destination),
            shell_quote(&self.source)
        )
    }

    /// Renders the multi-line log entry, blank line included.
    pub fn to_log_entry(&self) -> String {
        format!(
            "{} - Moved: {}\n  Source path: {}\n  Target path: {}\n  Rollback command: {}\n\n",
            self.moved_at.format(TIMESTAMP_FORMAT),
            self.file_name,
            self.source.to_string_lossy(),
            self.destination.to_string_lossy(),
            self.rollback_command()
        )
    }
}

/// Flat log file receiving `MoveRecord` entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementLog {
    path: PathBuf,
}

impl MovementLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one record, creating the file on first use.
    ///
    /// # Errors
    /// - Returns the I/O error from opening or writing the log file.
    pub fn append(&self, record: &MoveRecord) -> io::Result<()> {
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| {
                file.write_all(record.to_log_entry().as_bytes())?;
                file.flush()
            });

        match &result {
            Ok(()) => info!(
                "event=movement_log_append module=movement_log status=ok file_name={} log={}",
                record.file_name,
                self.path.display()
            ),
            Err(err) => error!(
                "event=movement_log_append module=movement_log status=error file_name={} log={} error={}",
                record.file_name,
                self.path.display(),
                err
            ),
        }
        result
    }
}

/// Quotes `path` for a POSIX shell when it contains anything beyond a
/// conservative set of safe characters.
fn shell_quote(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let is_safe = !raw.is_empty()
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '/' | '-'));
    if is_safe {
        raw.into_owned()
    } else {
        format!("'{}'", raw.replace('\'', r"'\''"))
    }
}
