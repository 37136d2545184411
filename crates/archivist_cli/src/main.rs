//! Interactive archive entry point.
//!
//! # Responsibility
//! - Bind stdin/stdout to the core decision provider.
//! - Bootstrap diagnostic logging from the environment.
//! - Map a fatal run error to exit code 1.

use archivist_core::{
    core_version, default_log_level, init_logging, prompt_vault_root, run_archive,
    ConsoleProvider, MovementLog, RunError, RunSummary, VaultConfig,
};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

const LOG_DIR_ENV: &str = "ARCHIVIST_LOG_DIR";
const LOG_LEVEL_ENV: &str = "ARCHIVIST_LOG_LEVEL";

fn main() -> ExitCode {
    setup_logging();

    match run() {
        Ok(summary) => {
            info!(
                "event=cli_exit module=cli status=ok moved={} failures={}",
                summary.moved, summary.failures
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=cli_exit module=cli status=error error={err}");
            eprintln!("archivist: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<RunSummary, RunError> {
    let mut console = ConsoleProvider::stdio();
    let vault_root = prompt_vault_root(&mut console)?;
    let config = VaultConfig::new(vault_root);
    let log = MovementLog::new(config.movement_log_path.clone());
    run_archive(&config, &mut console, &log)
}

/// Logging is best-effort: a bad directory or level only costs diagnostics.
fn setup_logging() {
    let level = std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| default_log_level().to_string());
    let log_dir = match std::env::var_os(LOG_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => match std::env::current_dir() {
            Ok(cwd) => cwd.join(".archivist").join("logs"),
            Err(err) => {
                eprintln!("archivist: diagnostic logging disabled: {err}");
                return;
            }
        },
    };

    match init_logging(&level, &log_dir) {
        Ok(()) => info!(
            "event=cli_start module=cli status=ok version={}",
            core_version()
        ),
        Err(err) => eprintln!("archivist: diagnostic logging disabled: {err}"),
    }
}
