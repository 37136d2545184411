//! End-to-end archive pass.
//!
//! # Responsibility
//! - Ask for and validate the vault root.
//! - Walk archive notes, extract their links and drive `AssetMover`.
//! - Report per-asset outcomes and the before/after file count.
//!
//! # Invariants
//! - Each step runs once, in order; only the vault prompt repeats.
//! - A file name is relocated at most once per run.
//! - An unreadable note aborts the run; per-asset failures never do.

use crate::config::{validate_vault_path, VaultConfig};
use crate::links::extract_wiki_links;
use crate::mover::{AssetMover, MoveOutcome};
use crate::movement_log::MovementLog;
use crate::prompt::DecisionProvider;
use crate::walker::{collect_markdown_files, count_files};
use log::{error, info};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;
use std::time::Instant;

const VAULT_PROMPT: &str =
    "Enter the path to the root of your Obsidian vault (e.g., ./obsidian): ";

/// Fatal run error.
#[derive(Debug)]
pub enum RunError {
    /// A note under the archive folder could not be read as UTF-8 text.
    ReadNote { path: PathBuf, source: io::Error },
    /// Operator input failed outside of a per-asset prompt.
    Prompt(io::Error),
}

impl Display for RunError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadNote { path, source } => {
                write!(f, "failed to read note `{}`: {source}", path.display())
            }
            Self::Prompt(err) => write!(f, "operator input failed: {err}"),
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ReadNote { source, .. } => Some(source),
            Self::Prompt(err) => Some(err),
        }
    }
}

impl From<io::Error> for RunError {
    fn from(value: io::Error) -> Self {
        Self::Prompt(value)
    }
}

/// Counters collected over one archive pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub initial_file_count: usize,
    pub final_file_count: usize,
    pub notes_scanned: usize,
    pub links_found: usize,
    pub moved: usize,
    pub not_found: usize,
    pub already_relocated: usize,
    pub collisions: usize,
    pub failures: usize,
    /// Moves whose log entry could not be written.
    pub unlogged_moves: usize,
}

impl RunSummary {
    /// `initial - final`; positive when files disappeared from the vault.
    pub fn file_count_delta(&self) -> i64 {
        self.initial_file_count as i64 - self.final_file_count as i64
    }

    fn record(&mut self, outcome: &MoveOutcome) {
        match outcome {
            MoveOutcome::Moved { log_error, .. } => {
                self.moved += 1;
                if log_error.is_some() {
                    self.unlogged_moves += 1;
                }
            }
            MoveOutcome::NotFound { .. } => self.not_found += 1,
            MoveOutcome::AlreadyRelocated { .. } => self.already_relocated += 1,
            MoveOutcome::Collision { .. } => self.collisions += 1,
            MoveOutcome::PermissionDenied { .. } | MoveOutcome::IoError { .. } => {
                self.failures += 1
            }
        }
    }
}

/// Asks for the vault root until a valid path is given.
///
/// # Errors
/// - Propagates provider input errors, so a closed stdin ends the loop.
pub fn prompt_vault_root(provider: &mut dyn DecisionProvider) -> io::Result<PathBuf> {
    loop {
        let answer = provider.ask(VAULT_PROMPT)?;
        match validate_vault_path(&answer) {
            Ok(path) => return Ok(path),
            Err(err) => provider.say(&format!("{err}. Try again.")),
        }
    }
}

/// Renders one operator-facing line for a move outcome.
pub fn describe_outcome(outcome: &MoveOutcome) -> String {
    match outcome {
        MoveOutcome::Moved { record, log_error } => {
            let moved = format!(
                "Moved: {} -> {}",
                record.file_name,
                record.destination.display()
            );
            match log_error {
                None => format!("{moved}\nLog saved: {}", record.file_name),
                Some(err) => format!("{moved}\nError writing to log: {err}"),
            }
        }
        MoveOutcome::NotFound { file_name } => format!("File not found: {file_name}"),
        MoveOutcome::AlreadyRelocated { file_name } => {
            format!("Already moved during this run, skipping: {file_name}")
        }
        MoveOutcome::PermissionDenied { directory, .. } => format!(
            "Error: no permission to create folder in {}. Try selecting a different folder.",
            directory.display()
        ),
        MoveOutcome::Collision { destination } => format!(
            "File already exists in {}, skipping",
            destination.display()
        ),
        MoveOutcome::IoError {
            stage,
            path,
            message,
        } => format!("Error during {stage} for {}: {message}", path.display()),
    }
}

/// Runs one full archive pass over `config`.
///
/// # Errors
/// - Returns `RunError::ReadNote` when a note cannot be read; moves already
///   made stay in place and remain logged.
pub fn run_archive(
    config: &VaultConfig,
    provider: &mut dyn DecisionProvider,
    log: &MovementLog,
) -> Result<RunSummary, RunError> {
    let started_at = Instant::now();
    info!(
        "event=archive_run module=run status=start vault={} archive={} references={}",
        config.vault_root.display(),
        config.archive_dir.display(),
        config.references_dir.display()
    );

    let mut summary = RunSummary {
        initial_file_count: count_files(&config.vault_root),
        ..RunSummary::default()
    };
    provider.say(&format!(
        "The vault contains {} files at the beginning.",
        summary.initial_file_count
    ));

    let mover = AssetMover::new(config, log);
    let mut relocated = HashSet::<String>::new();

    for note_path in collect_markdown_files(&config.archive_dir) {
        provider.say("");
        provider.say(&format!("Processing file: {}", note_path.display()));

        let links = match extract_wiki_links(&note_path) {
            Ok(links) => links,
            Err(source) => {
                error!(
                    "event=archive_run module=run status=error note={} duration_ms={} error={}",
                    note_path.display(),
                    started_at.elapsed().as_millis(),
                    source
                );
                return Err(RunError::ReadNote {
                    path: note_path,
                    source,
                });
            }
        };
        summary.notes_scanned += 1;
        summary.links_found += links.len();
        provider.say(&format!("Found links: {links:?}"));

        for link in links {
            let outcome = if relocated.contains(&link) {
                MoveOutcome::AlreadyRelocated { file_name: link }
            } else {
                let outcome = mover.move_asset(provider, &link, &note_path);
                if outcome.is_moved() {
                    relocated.insert(link);
                }
                outcome
            };
            provider.say(&describe_outcome(&outcome));
            summary.record(&outcome);
        }
    }

    summary.final_file_count = count_files(&config.vault_root);
    provider.say("");
    provider.say(&format!(
        "The vault contains {} files after processing.",
        summary.final_file_count
    ));
    match summary.file_count_delta() {
        0 => provider.say("The number of files has not changed."),
        delta => provider.say(&format!("The number of files changed by {delta}.")),
    }

    info!(
        "event=archive_run module=run status=ok duration_ms={} notes={} links={} moved={} failures={}",
        started_at.elapsed().as_millis(),
        summary.notes_scanned,
        summary.links_found,
        summary.moved,
        summary.failures
    );
    Ok(summary)
}
