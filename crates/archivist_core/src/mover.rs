//! Interactive asset relocation.
//!
//! # Responsibility
//! - Locate a linked asset in the references tree, then the archive root.
//! - Let the operator confirm or override the destination folder.
//! - Move the file and record the move in the movement log.
//!
//! # Invariants
//! - An existing destination file is never overwritten.
//! - A log entry is written only after the move succeeded.
//! - Every exit path is a `MoveOutcome`; nothing here panics or returns `Err`.

use crate::chooser::choose_target_directory;
use crate::config::VaultConfig;
use crate::movement_log::{MoveRecord, MovementLog};
use crate::prompt::DecisionProvider;
use crate::walker::{find_file_by_name, list_subdirectories};
use log::{info, warn};
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Step at which an unexpected I/O failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStage {
    Prompt,
    CreateDirectory,
    Move,
}

impl Display for MoveStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Prompt => "prompt",
            Self::CreateDirectory => "create_directory",
            Self::Move => "move",
        };
        f.write_str(label)
    }
}

/// Result of one `AssetMover::move_asset` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// File moved. `log_error` is set when the movement log append failed.
    Moved {
        record: MoveRecord,
        log_error: Option<String>,
    },
    /// Neither search root holds a file with this name.
    NotFound { file_name: String },
    /// Same name was already relocated earlier in this run.
    AlreadyRelocated { file_name: String },
    /// Destination folder could not be created for lack of permission.
    PermissionDenied { directory: PathBuf, message: String },
    /// A file with this name already sits in the destination folder.
    Collision { destination: PathBuf },
    IoError {
        stage: MoveStage,
        path: PathBuf,
        message: String,
    },
}

impl MoveOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }

    fn status(&self) -> &'static str {
        match self {
            Self::Moved { .. } => "ok",
            Self::NotFound { .. } | Self::AlreadyRelocated { .. } | Self::Collision { .. } => {
                "skip"
            }
            Self::PermissionDenied { .. } | Self::IoError { .. } => "error",
        }
    }
}

/// Moves linked assets next to the notes that reference them.
pub struct AssetMover<'a> {
    config: &'a VaultConfig,
    log: &'a MovementLog,
}

impl<'a> AssetMover<'a> {
    pub fn new(config: &'a VaultConfig, log: &'a MovementLog) -> Self {
        Self { config, log }
    }

    /// Finds `file_name` under the references tree, falling back to a file
    /// directly inside the archive folder.
    pub fn locate_asset(&self, file_name: &str) -> Option<PathBuf> {
        find_file_by_name(&self.config.references_dir, file_name).or_else(|| {
            let fallback = self.config.archive_dir.join(file_name);
            fallback.exists().then_some(fallback)
        })
    }

    /// Relocates one linked asset referenced from `note_path`.
    ///
    /// # Side effects
    /// - Prompts the operator for a destination folder.
    /// - May create directories, move one file and append to the movement log.
    pub fn move_asset(
        &self,
        provider: &mut dyn DecisionProvider,
        file_name: &str,
        note_path: &Path,
    ) -> MoveOutcome {
        let outcome = self.try_move(provider, file_name, note_path);
        let level = match outcome {
            MoveOutcome::PermissionDenied { .. } | MoveOutcome::IoError { .. } => log::Level::Warn,
            _ => log::Level::Info,
        };
        log::log!(
            level,
            "event=asset_move module=mover status={} file_name={} note={}",
            outcome.status(),
            file_name,
            note_path.display()
        );
        outcome
    }

    fn try_move(
        &self,
        provider: &mut dyn DecisionProvider,
        file_name: &str,
        note_path: &Path,
    ) -> MoveOutcome {
        let Some(source) = self.locate_asset(file_name) else {
            return MoveOutcome::NotFound {
                file_name: file_name.to_string(),
            };
        };

        let note_dir = note_path.parent().unwrap_or(Path::new("")).to_path_buf();
        provider.say("");
        provider.say(&format!("File found: {}", source.display()));
        provider.say(&format!("In note: {}", note_path.display()));
        provider.say(&format!(
            "Default path: {}",
            note_dir.join(file_name).display()
        ));

        let candidates = list_subdirectories(&self.config.archive_dir);
        let choice = match choose_target_directory(
            provider,
            &note_dir,
            &candidates,
            self.config.menu_limit,
        ) {
            Ok(choice) => choice,
            Err(err) => {
                return MoveOutcome::IoError {
                    stage: MoveStage::Prompt,
                    path: note_dir,
                    message: err.to_string(),
                }
            }
        };
        info!(
            "event=target_choice module=mover status=ok choice={:?} directory={}",
            choice,
            choice.directory().display()
        );
        let target_dir = choice.into_directory();

        if let Err(err) = fs::create_dir_all(&target_dir) {
            return if err.kind() == io::ErrorKind::PermissionDenied {
                MoveOutcome::PermissionDenied {
                    directory: target_dir,
                    message: err.to_string(),
                }
            } else {
                MoveOutcome::IoError {
                    stage: MoveStage::CreateDirectory,
                    path: target_dir,
                    message: err.to_string(),
                }
            };
        }

        let destination = target_dir.join(file_name);
        if destination.exists() {
            return MoveOutcome::Collision { destination };
        }

        if let Err(err) = move_file(&source, &destination) {
            return MoveOutcome::IoError {
                stage: MoveStage::Move,
                path: source,
                message: err.to_string(),
            };
        }

        let record = MoveRecord::new(file_name, source, destination);
        let log_error = self.log.append(&record).err().map(|err| err.to_string());
        MoveOutcome::Moved { record, log_error }
    }
}

/// Renames `source` to `destination`, copying then deleting when a plain
/// rename is refused (e.g. across filesystems).
fn move_file(source: &Path, destination: &Path) -> io::Result<()> {
    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            warn!(
                "event=file_rename module=mover status=fallback source={} error={}",
                source.display(),
                rename_err
            );
            copy_then_remove(source, destination, |from, to| fs::copy(from, to))
        }
    }
}

/// Copies `source` with `copy`, then deletes it.
///
/// # Invariants
/// - On any failure `destination` is removed, so no partial or duplicate
///   file is left for a later run to report as a collision.
fn copy_then_remove<F>(source: &Path, destination: &Path, copy: F) -> io::Result<()>
where
    F: FnOnce(&Path, &Path) -> io::Result<u64>,
{
    let result = copy(source, destination).and_then(|_| fs::remove_file(source));
    if result.is_err() {
        let _ = fs::remove_file(destination);
    }
    result
}
