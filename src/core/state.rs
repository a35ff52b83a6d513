//! Repository data model and state snapshot.
//!
//! This module defines the plain-data structures the simulator works on. Everything
//! here serialises to the JSON snapshot shape consumed by persistence and rendering:
//! `{commits, branches, tags, HEAD, stagingArea, workingDirectory, commandHistory,
//! lastOutput}`.
//!
//! # Public API
//! - [`FileEntry`] / [`FileStructure`]: Files and path-keyed file maps
//! - [`Commit`]: Immutable snapshot of the full tree plus its parents
//! - [`Branch`]: Mutable named pointer to a commit
//! - [`HeadState`]: Attached (branch) or detached HEAD
//! - [`RepoState`]: The complete repository snapshot
//! - [`ScenarioPatch`]: Partial snapshot merged in by `load_scenario`
//!
//! Maps are ordered so that snapshots serialise deterministically.

use crate::core::{
    ancestry::find_cycle,
    error::{Result, SimulatorError},
    file_status::FileStatus,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Commit identifier. Short pseudo-hashes, not real object ids.
pub type CommitHash = String;

/// Path-keyed collection of files. Paths are unique by construction.
pub type FileStructure = BTreeMap<String, FileEntry>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: String,
    pub content: String,
    pub status: FileStatus,
}

impl FileEntry {
    pub fn new(path: impl Into<String>, content: impl Into<String>, status: FileStatus) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            status,
        }
    }

    /// Copy of this entry with a different status
    pub fn with_status(&self, status: FileStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub hash: CommitHash,
    /// First parent is the branch that was checked out; second (merges only) is the
    /// branch that was merged in. Empty for root commits.
    pub parents: Vec<CommitHash>,
    pub message: String,
    pub author: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub tree: FileStructure,
}

impl Commit {
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn first_parent(&self) -> Option<&str> {
        self.parents.first().map(String::as_str)
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }
}

/// Seven-character abbreviation used in command output
pub fn short_hash(hash: &str) -> &str {
    hash.char_indices()
        .nth(7)
        .map_or(hash, |(idx, _)| &hash[..idx])
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub name: String,
    pub head_commit_hash: CommitHash,
    /// Display attribute only
    pub color: String,
}

/// Where HEAD points. Serialises as `{"type": "branch"|"detached", "ref": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "ref", rename_all = "lowercase")]
pub enum HeadState {
    /// Attached to the named branch
    Branch(String),
    /// Pointing straight at a commit hash
    Detached(CommitHash),
}

impl HeadState {
    pub fn branch(name: impl Into<String>) -> Self {
        HeadState::Branch(name.into())
    }

    pub fn detached(hash: impl Into<String>) -> Self {
        HeadState::Detached(hash.into())
    }

    /// The raw `ref` value: a branch name or a commit hash
    pub fn reference(&self) -> &str {
        match self {
            HeadState::Branch(name) => name,
            HeadState::Detached(hash) => hash,
        }
    }

    pub fn is_detached(&self) -> bool {
        matches!(self, HeadState::Detached(_))
    }
}

impl Default for HeadState {
    fn default() -> Self {
        HeadState::Branch(crate::core::config::DEFAULT_BRANCH.to_string())
    }
}

/// Complete repository snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoState {
    pub commits: BTreeMap<CommitHash, Commit>,
    pub branches: BTreeMap<String, Branch>,
    pub tags: BTreeMap<String, CommitHash>,
    #[serde(rename = "HEAD")]
    pub head: HeadState,
    pub staging_area: FileStructure,
    pub working_directory: FileStructure,
    pub command_history: Vec<String>,
    pub last_output: String,
}

impl RepoState {
    /// Name of the checked-out branch, or `None` when HEAD is detached
    pub fn current_branch(&self) -> Option<&str> {
        match &self.head {
            HeadState::Branch(name) => Some(name),
            HeadState::Detached(_) => None,
        }
    }

    /// Hash of the commit HEAD resolves to, if any
    pub fn head_commit_hash(&self) -> Option<&str> {
        match &self.head {
            HeadState::Branch(name) => self
                .branches
                .get(name)
                .map(|branch| branch.head_commit_hash.as_str()),
            HeadState::Detached(hash) => Some(hash),
        }
    }

    pub fn head_commit(&self) -> Option<&Commit> {
        self.head_commit_hash()
            .and_then(|hash| self.commits.get(hash))
    }

    /// Check the structural invariants a live repository must uphold.
    ///
    /// Used to vet externally supplied scenarios before they replace live state.
    pub fn validate(&self) -> Result<()> {
        for (key, commit) in &self.commits {
            if key != &commit.hash {
                return Err(SimulatorError::invalid_scenario(format!(
                    "commit stored under '{key}' has hash '{}'",
                    commit.hash
                )));
            }
            if let Some(missing) = commit
                .parents
                .iter()
                .find(|parent| !self.commits.contains_key(*parent))
            {
                return Err(SimulatorError::invalid_scenario(format!(
                    "commit '{key}' references missing parent '{missing}'"
                )));
            }
        }

        if let Some(hash) = find_cycle(&self.commits) {
            return Err(SimulatorError::invalid_scenario(format!(
                "commit graph contains a cycle at '{hash}'"
            )));
        }

        for (name, branch) in &self.branches {
            if name != &branch.name {
                return Err(SimulatorError::invalid_scenario(format!(
                    "branch stored under '{name}' is named '{}'",
                    branch.name
                )));
            }
            if !self.commits.contains_key(&branch.head_commit_hash) {
                return Err(SimulatorError::invalid_scenario(format!(
                    "branch '{name}' points at missing commit '{}'",
                    branch.head_commit_hash
                )));
            }
        }

        if let Some((name, hash)) = self
            .tags
            .iter()
            .find(|(_, hash)| !self.commits.contains_key(*hash))
        {
            return Err(SimulatorError::invalid_scenario(format!(
                "tag '{name}' points at missing commit '{hash}'"
            )));
        }

        match &self.head {
            // An empty repository still has HEAD on the unborn default branch
            HeadState::Branch(name) if !self.commits.is_empty() => {
                if !self.branches.contains_key(name) {
                    return Err(SimulatorError::invalid_scenario(format!(
                        "HEAD names missing branch '{name}'"
                    )));
                }
            }
            HeadState::Detached(hash) => {
                if !self.commits.contains_key(hash) {
                    return Err(SimulatorError::invalid_scenario(format!(
                        "detached HEAD points at missing commit '{hash}'"
                    )));
                }
            }
            HeadState::Branch(_) => {}
        }

        if let Some(path) = self
            .staging_area
            .keys()
            .find(|path| !self.working_directory.contains_key(*path))
        {
            return Err(SimulatorError::invalid_scenario(format!(
                "staged file '{path}' is missing from the working directory"
            )));
        }

        Ok(())
    }
}

/// Partial snapshot; every present field replaces the live one wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScenarioPatch {
    pub commits: Option<BTreeMap<CommitHash, Commit>>,
    pub branches: Option<BTreeMap<String, Branch>>,
    pub tags: Option<BTreeMap<String, CommitHash>>,
    #[serde(rename = "HEAD")]
    pub head: Option<HeadState>,
    pub staging_area: Option<FileStructure>,
    pub working_directory: Option<FileStructure>,
    pub command_history: Option<Vec<String>>,
    pub last_output: Option<String>,
}

impl ScenarioPatch {
    /// Shallow merge into `state`
    pub fn apply_to(self, state: &mut RepoState) {
        if let Some(commits) = self.commits {
            state.commits = commits;
        }
        if let Some(branches) = self.branches {
            state.branches = branches;
        }
        if let Some(tags) = self.tags {
            state.tags = tags;
        }
        if let Some(head) = self.head {
            state.head = head;
        }
        if let Some(staging_area) = self.staging_area {
            state.staging_area = staging_area;
        }
        if let Some(working_directory) = self.working_directory {
            state.working_directory = working_directory;
        }
        if let Some(command_history) = self.command_history {
            state.command_history = command_history;
        }
        if let Some(last_output) = self.last_output {
            state.last_output = last_output;
        }
    }
}

impl From<RepoState> for ScenarioPatch {
    fn from(state: RepoState) -> Self {
        Self {
            commits: Some(state.commits),
            branches: Some(state.branches),
            tags: Some(state.tags),
            head: Some(state.head),
            staging_area: Some(state.staging_area),
            working_directory: Some(state.working_directory),
            command_history: Some(state.command_history),
            last_output: Some(state.last_output),
        }
    }
}
