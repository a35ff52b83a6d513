//! Type-safe working-tree file status enumeration.
//!
//! This module defines [`FileStatus`], the per-file state tracked by the simulated
//! working directory and staging area. Every file in the simulator carries exactly one
//! of these states; `git status` is a pure projection over them.
//!
//! # Public API
//! - [`FileStatus`]: Main enumeration for all simulated file states
//!
//! # Key Features
//! - **Serde integration**: Serialises as the lowercase names used in snapshots
//! - **Display formatting**: Consistent string representation for command output
//! - **Sorting logic**: Built-in priority ordering for status display

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a single file in the simulated working directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// Identical to the last commit
    #[default]
    Unmodified,
    /// Edited since the last commit, not yet staged
    Modified,
    /// Copied into the staging area
    Staged,
    /// Marked as removed
    Deleted,
    /// New file that has never been committed
    Added,
}

impl FileStatus {
    /// Get the string representation used in snapshots and output
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::Unmodified => "unmodified",
            FileStatus::Modified => "modified",
            FileStatus::Staged => "staged",
            FileStatus::Deleted => "deleted",
            FileStatus::Added => "added",
        }
    }

    /// Whether `git add` will pick this file up
    pub fn is_stageable(&self) -> bool {
        !matches!(self, FileStatus::Unmodified)
    }

    /// Files that have never been committed are reported as untracked
    pub fn is_untracked(&self) -> bool {
        matches!(self, FileStatus::Added)
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FileStatus {
    type Err = String;

    fn from_str(status: &str) -> Result<Self, Self::Err> {
        match status {
            "unmodified" => Ok(FileStatus::Unmodified),
            "modified" => Ok(FileStatus::Modified),
            "staged" => Ok(FileStatus::Staged),
            "deleted" => Ok(FileStatus::Deleted),
            "added" => Ok(FileStatus::Added),
            other => Err(format!("unknown file status '{other}'")),
        }
    }
}
