//! Core logic for Archivist.
//! Moves assets linked from archived vault notes next to those notes.

pub mod chooser;
pub mod config;
pub mod links;
pub mod logging;
pub mod mover;
pub mod movement_log;
pub mod prompt;
pub mod run;
pub mod walker;

pub use chooser::{choose_target_directory, TargetChoice};
pub use config::{validate_vault_path, VaultConfig, VaultPathError};
pub use links::{extract_wiki_links, extract_wiki_links_from_str};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use mover::{AssetMover, MoveOutcome, MoveStage};
pub use movement_log::{MoveRecord, MovementLog};
pub use prompt::{ConsoleProvider, DecisionProvider, ScriptedProvider, TranscriptLine};
pub use run::{describe_outcome, prompt_vault_root, run_archive, RunError, RunSummary};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
