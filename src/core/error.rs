//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`SimulatorError`] which covers every way a simulated git
//! operation can be refused. The `Display` text of each variant is exactly what the
//! repository reports in `lastOutput`, so the messages mirror real git wording.
//!
//! # Public API
//! - [`SimulatorError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, SimulatorError>`
//!
//! # Error Categories
//! - **Preconditions**: Empty staging area, root-commit reset, duplicate branch, ...
//! - **Unresolvable references**: Unknown checkout target or reset target
//! - **Command text**: Unknown commands, unknown subcommands, usage errors
//! - **Scenarios**: Snapshots that would break repository invariants
//! - **Persistence**: Invalid keys, oversized or malformed snapshots, I/O

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for git-simulator
#[derive(Error, Debug)]
pub enum SimulatorError {
    // Precondition violations
    #[error("Nothing to commit (no staged changes)")]
    NothingToCommit,

    #[error("fatal: A branch named '{name}' already exists")]
    BranchExists { name: String },

    #[error("fatal: '{name}' is not a valid branch")]
    InvalidBranch { name: String },

    #[error("Cannot merge into detached HEAD state")]
    DetachedMerge,

    #[error("Cannot reset: this is the root commit")]
    ResetAtRoot,

    #[error("fatal: your current branch '{branch}' does not have any commits yet")]
    NoCommitCheckedOut { branch: String },

    #[error("fatal: '{path}' already exists in the working directory")]
    FileExists { path: String },

    // Unresolvable references
    #[error("error: pathspec '{reference}' did not match any file(s) known to git")]
    PathspecMismatch { reference: String },

    #[error("fatal: '{reference}' is not a valid commit")]
    InvalidCommit { reference: String },

    // Command text errors
    #[error("Command not found: {command}")]
    CommandNotFound { command: String },

    #[error("git: '{subcommand}' is not a git command")]
    NotAGitCommand { subcommand: String },

    #[error("Usage: {usage}")]
    Usage { usage: String },

    // Scenario loading
    #[error("fatal: invalid scenario: {reason}")]
    InvalidScenario { reason: String },

    // Persistence errors
    #[error("Invalid storage key: '{key}'")]
    InvalidStorageKey { key: String },

    #[error("Snapshot too large to save ({size} bytes, limit {limit})")]
    SnapshotTooLarge { size: usize, limit: usize },

    #[error("Invalid storage format: {reason}")]
    MalformedSnapshot { reason: String },

    #[error("Invalid commit data: {key}")]
    InvalidCommitRecord { key: String },

    #[error("Could not find data directory")]
    DataDirectoryNotFound,

    // Configuration errors
    #[error("Could not find config directory")]
    ConfigDirectoryNotFound,

    #[error("Failed to parse config file '{}': {source}", path.display())]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using SimulatorError
pub type Result<T> = std::result::Result<T, SimulatorError>;

impl SimulatorError {
    /// Create a duplicate branch error
    pub fn branch_exists(name: impl Into<String>) -> Self {
        Self::BranchExists { name: name.into() }
    }

    /// Create an unknown merge source error
    pub fn invalid_branch(name: impl Into<String>) -> Self {
        Self::InvalidBranch { name: name.into() }
    }

    /// Create an unborn branch error
    pub fn no_commit_checked_out(branch: impl Into<String>) -> Self {
        Self::NoCommitCheckedOut {
            branch: branch.into(),
        }
    }

    /// Create a file collision error
    pub fn file_exists(path: impl Into<String>) -> Self {
        Self::FileExists { path: path.into() }
    }

    /// Create an unresolvable checkout target error
    pub fn pathspec_mismatch(reference: impl Into<String>) -> Self {
        Self::PathspecMismatch {
            reference: reference.into(),
        }
    }

    /// Create an unresolvable commit reference error
    pub fn invalid_commit(reference: impl Into<String>) -> Self {
        Self::InvalidCommit {
            reference: reference.into(),
        }
    }

    /// Create a command not found error
    pub fn command_not_found(command: impl Into<String>) -> Self {
        Self::CommandNotFound {
            command: command.into(),
        }
    }

    /// Create an unknown subcommand error
    pub fn not_a_git_command(subcommand: impl Into<String>) -> Self {
        Self::NotAGitCommand {
            subcommand: subcommand.into(),
        }
    }

    /// Create a usage error
    pub fn usage(usage: impl Into<String>) -> Self {
        Self::Usage {
            usage: usage.into(),
        }
    }

    /// Create an invalid scenario error
    pub fn invalid_scenario(reason: impl Into<String>) -> Self {
        Self::InvalidScenario {
            reason: reason.into(),
        }
    }

    /// Create an invalid storage key error
    pub fn invalid_storage_key(key: impl Into<String>) -> Self {
        Self::InvalidStorageKey { key: key.into() }
    }

    /// Create a malformed snapshot error
    pub fn malformed_snapshot(reason: impl Into<String>) -> Self {
        Self::MalformedSnapshot {
            reason: reason.into(),
        }
    }

    /// Create a config parse failed error
    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }
}
