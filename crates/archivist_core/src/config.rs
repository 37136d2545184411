//! Vault layout configuration.
//!
//! # Responsibility
//! - Derive archive/references folders from one validated vault root.
//! - Carry run-wide settings explicitly instead of through process globals.
//!
//! # Invariants
//! - `archive_dir` and `references_dir` are always direct children of
//!   `vault_root`.
//! - A `VaultConfig` is built once per run and only borrowed afterwards.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Folder whose markdown notes are scanned for wiki links.
pub const ARCHIVE_FOLDER_NAME: &str = "04_archive";
/// Folder searched first when locating a linked asset.
pub const REFERENCES_FOLDER_NAME: &str = "03_references";
/// Default movement log file, relative to the working directory.
pub const MOVEMENT_LOG_FILE: &str = "movement_history.txt";
/// Vault path prefixes accepted by the interactive prompt.
pub const ACCEPTED_VAULT_PREFIXES: &[&str] = &["./", "obsidian"];
/// Maximum number of candidate folders shown in the destination menu.
pub const DEFAULT_MENU_LIMIT: usize = 20;

/// Rejection reason for an operator-supplied vault path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultPathError {
    /// Path does not start with one of `ACCEPTED_VAULT_PREFIXES`.
    InvalidPrefix(String),
    /// Path has an accepted prefix but does not exist.
    NotFound(PathBuf),
}

impl Display for VaultPathError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPrefix(value) => write!(
                f,
                "vault path `{value}` should start with {}",
                ACCEPTED_VAULT_PREFIXES
                    .iter()
                    .map(|prefix| format!("`{prefix}`"))
                    .collect::<Vec<_>>()
                    .join(" or ")
            ),
            Self::NotFound(path) => write!(f, "vault path not found: {}", path.display()),
        }
    }
}

impl Error for VaultPathError {}

/// Validates raw vault path input.
///
/// Input is trimmed first. The prefix rule is checked before existence so a
/// misspelled prefix is reported as such even when the path happens to exist.
pub fn validate_vault_path(input: &str) -> Result<PathBuf, VaultPathError> {
    let trimmed = input.trim();
    if !ACCEPTED_VAULT_PREFIXES
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
    {
        return Err(VaultPathError::InvalidPrefix(trimmed.to_string()));
    }

    let path = PathBuf::from(trimmed);
    if !path.exists() {
        return Err(VaultPathError::NotFound(path));
    }
    Ok(path)
}

/// Run-wide vault layout and settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultConfig {
    pub vault_root: PathBuf,
    pub archive_dir: PathBuf,
    pub references_dir: PathBuf,
    /// Append-only log of completed moves.
    pub movement_log_path: PathBuf,
    /// Number of candidate folders listed in the destination menu.
    pub menu_limit: usize,
}

impl VaultConfig {
    /// Builds the standard layout under `vault_root`.
    ///
    /// Does not touch the filesystem; callers validate the root first.
    pub fn new(vault_root: impl Into<PathBuf>) -> Self {
        let vault_root = vault_root.into();
        Self {
            archive_dir: vault_root.join(ARCHIVE_FOLDER_NAME),
            references_dir: vault_root.join(REFERENCES_FOLDER_NAME),
            vault_root,
            movement_log_path: PathBuf::from(MOVEMENT_LOG_FILE),
            menu_limit: DEFAULT_MENU_LIMIT,
        }
    }

    pub fn with_movement_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.movement_log_path = path.into();
        self
    }

    pub fn with_menu_limit(mut self, limit: usize) -> Self {
        self.menu_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_vault_path, VaultConfig, VaultPathError, MOVEMENT_LOG_FILE};
    use std::path::PathBuf;

    #[test]
    fn new_derives_standard_subfolders() {
        let config = VaultConfig::new("./obsidian");
        assert_eq!(config.archive_dir, PathBuf::from("./obsidian/04_archive"));
        assert_eq!(
            config.references_dir,
            PathBuf::from("./obsidian/03_references")
        );
        assert_eq!(config.movement_log_path, PathBuf::from(MOVEMENT_LOG_FILE));
        assert_eq!(config.menu_limit, 20);
    }

    #[test]
    fn builder_overrides_log_path_and_menu_limit() {
        let config = VaultConfig::new("./v")
            .with_movement_log_path("/tmp/moves.txt")
            .with_menu_limit(3);
        assert_eq!(config.movement_log_path, PathBuf::from("/tmp/moves.txt"));
        assert_eq!(config.menu_limit, 3);
    }

    #[test]
    fn validate_rejects_unknown_prefix_before_existence() {
        let err = validate_vault_path("/tmp").expect_err("absolute path has no accepted prefix");
        assert_eq!(err, VaultPathError::InvalidPrefix("/tmp".to_string()));

        let err = validate_vault_path("   ").expect_err("blank input must be rejected");
        assert!(matches!(err, VaultPathError::InvalidPrefix(_)));
    }

    #[test]
    fn validate_reports_missing_path_with_accepted_prefix() {
        let err = validate_vault_path(" ./definitely-missing-vault-dir ")
            .expect_err("missing path must be rejected");
        assert_eq!(
            err,
            VaultPathError::NotFound(PathBuf::from("./definitely-missing-vault-dir"))
        );
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn validate_accepts_current_directory() {
        assert_eq!(validate_vault_path("./").unwrap(), PathBuf::from("./"));
    }
}
