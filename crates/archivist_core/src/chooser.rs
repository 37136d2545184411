//! Interactive destination chooser.
//!
//! # Responsibility
//! - Render a numbered menu of candidate destination folders.
//! - Resolve one operator answer into a concrete directory.
//!
//! # Invariants
//! - Exactly one menu answer is read; a second question is asked only when
//!   the operator picks the manual-entry option.
//! - Invalid numeric answers never re-prompt; they resolve to the default.
//! - Only the first `menu_limit` candidates are displayed, but every
//!   candidate keeps its number; the manual-entry option is always
//!   `candidates + 1`.

use crate::prompt::DecisionProvider;
use log::warn;
use std::io;
use std::path::{Path, PathBuf};

const CHOICE_PROMPT: &str = "Your choice (Enter = 0, or type a path): ";
const MANUAL_PROMPT: &str = "Enter the path manually: ";

/// Resolved destination together with how it was selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetChoice {
    /// Empty answer or `0`.
    Default(PathBuf),
    /// 1-based menu entry.
    Candidate { index: usize, directory: PathBuf },
    /// Free-form path, typed directly or through the manual-entry option.
    Manual(PathBuf),
    /// Out-of-range number or empty manual entry; resolved to the default.
    InvalidFallback(PathBuf),
}

impl TargetChoice {
    pub fn directory(&self) -> &Path {
        match self {
            Self::Default(path) | Self::Manual(path) | Self::InvalidFallback(path) => path,
            Self::Candidate { directory, .. } => directory,
        }
    }

    pub fn into_directory(self) -> PathBuf {
        match self {
            Self::Default(path) | Self::Manual(path) | Self::InvalidFallback(path) => path,
            Self::Candidate { directory, .. } => directory,
        }
    }
}

/// Shows the destination menu and resolves the operator's answer.
///
/// Only the first `menu_limit` candidates are listed; hidden candidates stay
/// selectable by number.
///
/// # Errors
/// - Propagates provider input errors (including closed input).
pub fn choose_target_directory(
    provider: &mut dyn DecisionProvider,
    default: &Path,
    candidates: &[PathBuf],
    menu_limit: usize,
) -> io::Result<TargetChoice> {
    let shown = &candidates[..candidates.len().min(menu_limit)];
    let manual_option = candidates.len() + 1;

    provider.say("");
    provider.say("Choose a folder to move the file to:");
    provider.say(&format!("[0] (default) {}", default.display()));
    for (offset, candidate) in shown.iter().enumerate() {
        provider.say(&format!("[{}] {}", offset + 1, candidate.display()));
    }
    provider.say(&format!("[{manual_option}] Enter the path manually"));

    let answer = provider.ask(CHOICE_PROMPT)?;
    let answer = answer.trim();

    if answer.is_empty() {
        return Ok(TargetChoice::Default(default.to_path_buf()));
    }
    if !answer.chars().all(|c| c.is_ascii_digit()) {
        return Ok(TargetChoice::Manual(PathBuf::from(answer)));
    }

    let index = match answer.parse::<usize>() {
        Ok(index) => index,
        Err(_) => return Ok(fallback(provider, default, "number too large")),
    };

    if index == 0 {
        Ok(TargetChoice::Default(default.to_path_buf()))
    } else if index <= candidates.len() {
        Ok(TargetChoice::Candidate {
            index,
            directory: candidates[index - 1].clone(),
        })
    } else if index == manual_option {
        let manual = provider.ask(MANUAL_PROMPT)?;
        let manual = manual.trim();
        if manual.is_empty() {
            Ok(fallback(provider, default, "empty manual path"))
        } else {
            Ok(TargetChoice::Manual(PathBuf::from(manual)))
        }
    } else {
        Ok(fallback(provider, default, "out of range"))
    }
}

fn fallback(provider: &mut dyn DecisionProvider, default: &Path, reason: &str) -> TargetChoice {
    warn!("event=target_choice module=chooser status=fallback reason=\"{reason}\"");
    provider.say(&format!("Invalid choice ({reason}). Using the default path."));
    TargetChoice::InvalidFallback(default.to_path_buf())
}
