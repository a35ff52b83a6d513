//! The repository state machine.
//!
//! [`Repository`] owns a [`RepoState`] and exposes the simulated git operations.
//! Every mutating operation is a transaction: it runs against a draft copy of the
//! state and the draft replaces the live state only if the whole transition
//! succeeds. A refused operation leaves everything untouched except `last_output`,
//! which receives the error text.
//!
//! # Public API
//! - [`Repository`]: State machine with injectable hash and clock providers
//! - [`AddTarget`], [`ResetMode`], [`MergeOutcome`], [`StatusReport`]: operation types

use crate::core::{
    ancestry::{is_ancestor, on_first_parent_chain, FirstParentWalk},
    colors::branch_color,
    config::SimulatorConfig,
    error::{Result, SimulatorError},
    file_status::FileStatus,
    providers::{Clock, HashGenerator, RandomHashGenerator, SystemClock},
    state::{
        short_hash, Branch, Commit, CommitHash, FileEntry, FileStructure, HeadState, RepoState,
        ScenarioPatch,
    },
};
use std::fmt;

/// Text appended by [`Repository::modify_file`] when no content is supplied
pub const MODIFY_MARKER: &str = "\n// Modified";

/// Which files `add` should consider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddTarget {
    All,
    Paths(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetMode {
    Soft,
    Hard,
}

impl ResetMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResetMode::Soft => "soft",
            ResetMode::Hard => "hard",
        }
    }
}

impl fmt::Display for ResetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of [`Repository::merge`]. `conflict` is never set: trees are unioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOutcome {
    pub success: bool,
    pub conflict: bool,
}

/// Paths grouped by working-directory status
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport {
    pub staged: Vec<String>,
    pub modified: Vec<String>,
    pub untracked: Vec<String>,
}

impl StatusReport {
    pub fn is_clean(&self) -> bool {
        self.staged.is_empty() && self.modified.is_empty() && self.untracked.is_empty()
    }
}

pub struct Repository {
    state: RepoState,
    config: SimulatorConfig,
    hashes: Box<dyn HashGenerator>,
    clock: Box<dyn Clock>,
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("state", &self.state)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Repository {
    /// Empty repository with production providers and default configuration
    pub fn new() -> Self {
        Self::with_config(SimulatorConfig::default())
    }

    pub fn with_config(config: SimulatorConfig) -> Self {
        Self::with_providers(
            config,
            Box::new(RandomHashGenerator::new()),
            Box::new(SystemClock),
        )
    }

    pub fn with_providers(
        config: SimulatorConfig,
        hashes: Box<dyn HashGenerator>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let state = Self::initial_state(&config);
        Self {
            state,
            config,
            hashes,
            clock,
        }
    }

    fn initial_state(config: &SimulatorConfig) -> RepoState {
        RepoState {
            head: HeadState::branch(&config.default_branch),
            ..RepoState::default()
        }
    }

    // === Read-only views ===

    /// Current snapshot
    pub fn state(&self) -> &RepoState {
        &self.state
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn last_output(&self) -> &str {
        &self.state.last_output
    }

    /// Name of the checked-out branch; `None` when HEAD is detached
    pub fn current_branch(&self) -> Option<&str> {
        self.state.current_branch()
    }

    pub fn head_commit(&self) -> Option<&Commit> {
        self.state.head_commit()
    }

    pub fn is_ancestor(&self, ancestor_hash: &str, descendant_hash: &str) -> bool {
        is_ancestor(&self.state.commits, ancestor_hash, descendant_hash)
    }

    // === Transaction plumbing ===

    /// Run `op` against a draft; swap the draft in only on success.
    fn transact<T>(&mut self, op: impl FnOnce(&mut Draft<'_>) -> Result<T>) -> Result<T> {
        let mut draft = Draft {
            state: self.state.clone(),
            config: &self.config,
            hashes: self.hashes.as_mut(),
            clock: self.clock.as_ref(),
        };

        let value = op(&mut draft)?;
        self.state = draft.state;
        Ok(value)
    }

    /// Record a refused operation: only `last_output` changes.
    fn refuse(&mut self, operation: &str, err: SimulatorError) {
        log::warn!("{operation} refused: {err}");
        self.state.last_output = err.to_string();
    }

    fn settle(&mut self, operation: &str, result: Result<()>) -> bool {
        match result {
            Ok(()) => {
                log::debug!("{operation}: {}", self.state.last_output);
                true
            }
            Err(err) => {
                self.refuse(operation, err);
                false
            }
        }
    }

    // === Operations ===

    /// Create the root commit and the default branch, and check it out.
    ///
    /// Existing commits, other branches and tags are kept; the default branch is
    /// repointed at the new root.
    pub fn init(&mut self) {
        let result = self.transact(|draft| {
            let config = draft.config;
            let seed = &config.seed_file;
            let seed_entry = FileEntry::new(&seed.path, &seed.content, FileStatus::Unmodified);
            let tree = FileStructure::from([(seed.path.clone(), seed_entry)]);
            let default_branch = config.default_branch.clone();

            let hash = draft.create_commit(Vec::new(), "Initial commit".to_string(), tree.clone());
            draft.state.branches.insert(
                default_branch.clone(),
                Branch {
                    name: default_branch.clone(),
                    head_commit_hash: hash,
                    color: branch_color(&default_branch, &default_branch).to_string(),
                },
            );
            draft.state.head = HeadState::Branch(default_branch);
            draft.state.working_directory = tree;
            draft.state.staging_area.clear();
            draft.finish("Initialized empty Git repository", "git init".to_string());
            Ok(())
        });
        self.settle("init", result);
    }

    /// Stage every requested file whose status is not `unmodified`.
    ///
    /// Unknown and unmodified paths are skipped silently. The reported count is the
    /// number of paths considered.
    pub fn add(&mut self, files: AddTarget) {
        let result = self.transact(|draft| {
            let (paths, history) = match files {
                AddTarget::All => (
                    draft.state.working_directory.keys().cloned().collect::<Vec<_>>(),
                    "git add .".to_string(),
                ),
                AddTarget::Paths(paths) => {
                    let history = format!("git add {}", paths.join(" "));
                    (paths, history)
                }
            };

            for path in &paths {
                let Some(entry) = draft.state.working_directory.get_mut(path) else {
                    continue;
                };
                if !entry.status.is_stageable() {
                    continue;
                }
                entry.status = FileStatus::Staged;
                let staged = entry.clone();
                draft.state.staging_area.insert(path.clone(), staged);
            }

            let output = format!("Added {} file(s) to staging area", paths.len());
            draft.finish(output, history);
            Ok(())
        });
        self.settle("add", result);
    }

    /// Simulate an edit. `None` appends [`MODIFY_MARKER`]. Unknown paths are ignored.
    pub fn modify_file(&mut self, path: &str, content: Option<&str>) {
        if !self.state.working_directory.contains_key(path) {
            log::debug!("modify_file: '{path}' not in working directory, ignoring");
            return;
        }

        let result = self.transact(|draft| {
            if let Some(entry) = draft.state.working_directory.get_mut(path) {
                match content {
                    Some(content) => entry.content = content.to_string(),
                    None => entry.content.push_str(MODIFY_MARKER),
                }
                if entry.status != FileStatus::Added {
                    entry.status = FileStatus::Modified;
                }
            }
            draft.state.last_output = format!("Modified file: {path}");
            Ok(())
        });
        self.settle("modify_file", result);
    }

    /// Create a file that has never been committed. It shows up as untracked.
    pub fn create_file(&mut self, path: &str, content: &str) -> bool {
        let result = self.transact(|draft| {
            if draft.state.working_directory.contains_key(path) {
                return Err(SimulatorError::file_exists(path));
            }
            draft.state.working_directory.insert(
                path.to_string(),
                FileEntry::new(path, content, FileStatus::Added),
            );
            draft.state.last_output = format!("Created file: {path}");
            Ok(())
        });
        self.settle("create_file", result)
    }

    /// Record the staged changes as a new commit.
    ///
    /// With a detached HEAD the new commit is reachable only through HEAD itself;
    /// no branch is created for it.
    pub fn commit(&mut self, message: &str) -> bool {
        let result = self.transact(|draft| {
            if draft.state.staging_area.is_empty() {
                return Err(SimulatorError::NothingToCommit);
            }

            let parents: Vec<CommitHash> = draft
                .state
                .head_commit_hash()
                .map(str::to_string)
                .into_iter()
                .collect();
            let tree: FileStructure = draft
                .state
                .working_directory
                .iter()
                .map(|(path, entry)| (path.clone(), entry.with_status(FileStatus::Unmodified)))
                .collect();

            let hash = draft.create_commit(parents, message.to_string(), tree);

            match draft.state.current_branch().map(str::to_string) {
                Some(name) => draft.move_branch(&name, &hash)?,
                None => draft.state.head = HeadState::detached(hash.clone()),
            }

            draft.state.staging_area.clear();
            for entry in draft.state.working_directory.values_mut() {
                entry.status = FileStatus::Unmodified;
            }

            let output = format!(
                "[{} {}] {message}",
                draft.state.head.reference(),
                short_hash(&hash)
            );
            draft.finish(output, format!("git commit -m \"{message}\""));
            Ok(())
        });
        self.settle("commit", result)
    }

    /// Check out a branch (preferred) or a commit hash (detached HEAD).
    pub fn checkout(&mut self, reference: &str) -> bool {
        let result = self.transact(|draft| {
            let output = if let Some(branch) = draft.state.branches.get(reference) {
                if let Some(commit) = draft.state.commits.get(&branch.head_commit_hash) {
                    draft.state.working_directory = commit.tree.clone();
                }
                draft.state.head = HeadState::branch(reference);
                format!("Switched to branch '{reference}'")
            } else if let Some(commit) = draft.state.commits.get(reference) {
                draft.state.working_directory = commit.tree.clone();
                draft.state.head = HeadState::detached(reference);
                format!("HEAD is now at {} (detached)", short_hash(reference))
            } else {
                return Err(SimulatorError::pathspec_mismatch(reference));
            };

            draft.state.staging_area.clear();
            draft.finish(output, format!("git checkout {reference}"));
            Ok(())
        });
        self.settle("checkout", result)
    }

    /// Create a branch at the checked-out commit. Does not switch to it.
    pub fn branch(&mut self, name: &str) -> bool {
        let result = self.transact(|draft| {
            if draft.state.branches.contains_key(name) {
                return Err(SimulatorError::branch_exists(name));
            }
            let target = draft.require_head_commit()?;
            let color = branch_color(name, &draft.config.default_branch).to_string();

            draft.state.branches.insert(
                name.to_string(),
                Branch {
                    name: name.to_string(),
                    head_commit_hash: target,
                    color,
                },
            );
            draft.finish(
                format!("Created branch '{name}'"),
                format!("git branch {name}"),
            );
            Ok(())
        });
        self.settle("branch", result)
    }

    /// Merge `source` into the checked-out branch.
    ///
    /// Fast-forwards when the current head lies on the source's first-parent chain
    /// (including when both heads are the same commit, which only restores the
    /// working directory), otherwise creates a merge commit whose tree is the union of both trees with
    /// the source winning on shared paths.
    pub fn merge(&mut self, source: &str) -> MergeOutcome {
        let result = self.transact(|draft| {
            let source_hash = draft
                .state
                .branches
                .get(source)
                .map(|branch| branch.head_commit_hash.clone())
                .ok_or_else(|| SimulatorError::invalid_branch(source))?;
            let current = match &draft.state.head {
                HeadState::Branch(name) => name.clone(),
                HeadState::Detached(_) => return Err(SimulatorError::DetachedMerge),
            };
            let current_hash = draft.require_head_commit()?;

            let source_commit = draft
                .state
                .commits
                .get(&source_hash)
                .ok_or_else(|| SimulatorError::invalid_commit(&source_hash))?;
            let current_commit = draft
                .state
                .commits
                .get(&current_hash)
                .ok_or_else(|| SimulatorError::invalid_commit(&current_hash))?;

            let output = if source_hash == current_hash {
                draft.state.working_directory = source_commit.tree.clone();
                "Already up to date.".to_string()
            } else if on_first_parent_chain(&draft.state.commits, &source_hash, &current_hash) {
                draft.state.working_directory = source_commit.tree.clone();
                draft.move_branch(&current, &source_hash)?;
                format!("Fast-forward merge: {current} -> {source}")
            } else {
                let mut tree = current_commit.tree.clone();
                tree.extend(source_commit.tree.clone());

                let hash = draft.create_commit(
                    vec![current_hash, source_hash],
                    format!("Merge branch '{source}' into {current}"),
                    tree.clone(),
                );
                draft.state.working_directory = tree;
                draft.move_branch(&current, &hash)?;
                "Merge made by the 'ort' strategy".to_string()
            };

            draft.finish(output, format!("git merge {source}"));
            Ok(())
        });

        MergeOutcome {
            success: self.settle("merge", result),
            conflict: false,
        }
    }

    /// Move the checked-out branch to the first parent of `reference` (or of HEAD).
    ///
    /// `--hard` also restores the parent's tree and clears the staging area. `--soft`
    /// leaves the working directory and staging area exactly as they are. A detached
    /// HEAD is never relocated.
    pub fn reset(&mut self, mode: ResetMode, reference: Option<&str>) -> bool {
        let result = self.transact(|draft| {
            let target_hash = match reference {
                Some(reference) => reference.to_string(),
                None => draft.require_head_commit()?,
            };
            let target = draft
                .state
                .commits
                .get(&target_hash)
                .ok_or_else(|| SimulatorError::invalid_commit(&target_hash))?;
            let parent_hash = target
                .first_parent()
                .map(str::to_string)
                .ok_or(SimulatorError::ResetAtRoot)?;
            let parent_tree = draft
                .state
                .commits
                .get(&parent_hash)
                .map(|parent| parent.tree.clone())
                .ok_or_else(|| SimulatorError::invalid_commit(&parent_hash))?;

            if let Some(name) = draft.state.current_branch().map(str::to_string) {
                draft.move_branch(&name, &parent_hash)?;
            }

            let output = match mode {
                ResetMode::Hard => {
                    draft.state.working_directory = parent_tree;
                    draft.state.staging_area.clear();
                    format!("HEAD is now at {}", short_hash(&parent_hash))
                }
                ResetMode::Soft => {
                    let paths: Vec<&str> = draft
                        .state
                        .working_directory
                        .keys()
                        .map(String::as_str)
                        .collect();
                    format!("Unstaged changes after reset:\n\t{}", paths.join("\n\t"))
                }
            };

            draft.finish(output, format!("git reset --{mode} HEAD~1"));
            Ok(())
        });
        self.settle("reset", result)
    }

    /// First-parent history from HEAD, newest first
    pub fn log(&self) -> Vec<&Commit> {
        FirstParentWalk::new(&self.state.commits, self.state.head_commit_hash()).collect()
    }

    pub fn status(&self) -> StatusReport {
        let mut report = StatusReport::default();
        for (path, entry) in &self.state.working_directory {
            match entry.status {
                FileStatus::Staged => report.staged.push(path.clone()),
                FileStatus::Modified => report.modified.push(path.clone()),
                status if status.is_untracked() => report.untracked.push(path.clone()),
                _ => {}
            }
        }
        report
    }

    /// Point tag `name` at the checked-out commit, replacing any existing tag of
    /// that name. Without a checked-out commit nothing changes, not even
    /// `last_output`.
    pub fn tag(&mut self, name: &str) -> bool {
        if self.state.head_commit().is_none() {
            log::debug!("tag '{name}' skipped: no commit checked out");
            return false;
        }
        let result = self.transact(|draft| {
            let target = draft.require_head_commit()?;
            let output = format!("Created tag '{name}' at {}", short_hash(&target));
            draft.state.tags.insert(name.to_string(), target);
            draft.finish(output, format!("git tag {name}"));
            Ok(())
        });
        self.settle("tag", result)
    }

    /// Tag names in sorted order. Records the listing in history.
    pub fn list_tags(&mut self) -> Vec<String> {
        let names: Vec<String> = self.state.tags.keys().cloned().collect();
        let output = if names.is_empty() {
            "No tags found".to_string()
        } else {
            names.join("\n")
        };
        let result = self.transact(|draft| {
            draft.finish(output, "git tag".to_string());
            Ok(())
        });
        self.settle("tag", result);
        names
    }

    /// Overwrite `last_output` without touching anything else
    pub fn report(&mut self, output: impl Into<String>) {
        self.state.last_output = output.into();
    }

    /// Record a refused command
    pub fn report_error(&mut self, err: SimulatorError) {
        self.refuse("command", err);
    }

    /// Back to the empty, uninitialised repository
    pub fn reset_state(&mut self) {
        self.state = Self::initial_state(&self.config);
        log::debug!("Repository state reset");
    }

    /// Merge a (partial) snapshot into the live state.
    ///
    /// The merged result must pass [`RepoState::validate`]; otherwise nothing but
    /// `last_output` changes.
    pub fn load_scenario(&mut self, patch: ScenarioPatch) -> bool {
        let result = self.transact(|draft| {
            patch.apply_to(&mut draft.state);
            draft.state.validate()
        });
        match result {
            Ok(()) => {
                log::debug!(
                    "Loaded scenario with {} commit(s) and {} branch(es)",
                    self.state.commits.len(),
                    self.state.branches.len()
                );
                true
            }
            Err(err) => {
                self.refuse("load_scenario", err);
                false
            }
        }
    }
}

/// Working copy of the state for one transaction
struct Draft<'a> {
    state: RepoState,
    config: &'a SimulatorConfig,
    hashes: &'a mut dyn HashGenerator,
    clock: &'a dyn Clock,
}

impl Draft<'_> {
    fn create_commit(
        &mut self,
        parents: Vec<CommitHash>,
        message: String,
        tree: FileStructure,
    ) -> CommitHash {
        let hash = self.fresh_hash();
        let commit = Commit {
            hash: hash.clone(),
            parents,
            message,
            author: self.config.author.clone(),
            timestamp: self.clock.now_millis(),
            tree,
        };
        log::debug!("Created commit {} with parents {:?}", commit.hash, commit.parents);
        self.state.commits.insert(hash.clone(), commit);
        hash
    }

    /// Generator output is not guaranteed unique; draw again on collision
    fn fresh_hash(&mut self) -> CommitHash {
        loop {
            let hash = self.hashes.next_hash();
            if !self.state.commits.contains_key(&hash) {
                return hash;
            }
            log::debug!("Hash collision on {hash}, drawing again");
        }
    }

    fn move_branch(&mut self, name: &str, hash: &str) -> Result<()> {
        let branch = self
            .state
            .branches
            .get_mut(name)
            .ok_or_else(|| SimulatorError::invalid_branch(name))?;
        branch.head_commit_hash = hash.to_string();
        Ok(())
    }

    fn require_head_commit(&self) -> Result<CommitHash> {
        self.state
            .head_commit_hash()
            .map(str::to_string)
            .ok_or_else(|| SimulatorError::no_commit_checked_out(self.state.head.reference()))
    }

    fn finish(&mut self, output: impl Into<String>, history: String) {
        self.state.last_output = output.into();
        self.state.command_history.push(history);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::providers::{FixedClock, SequentialHashGenerator};

    fn repo() -> Repository {
        Repository::with_providers(
            SimulatorConfig::default(),
            Box::new(SequentialHashGenerator::new()),
            Box::new(FixedClock(1_700_000_000_000)),
        )
    }

    fn initialised() -> Repository {
        let mut repo = repo();
        repo.init();
        repo
    }

    fn commit_change(repo: &mut Repository, content: &str, message: &str) -> CommitHash {
        repo.modify_file("README.md", Some(content));
        repo.add(AddTarget::All);
        assert!(repo.commit(message));
        repo.head_commit().unwrap().hash.clone()
    }

    #[test]
    fn test_init_creates_root_commit_and_main() {
        let repo = initialised();
        let state = repo.state();

        assert_eq!(state.commits.len(), 1);
        assert_eq!(state.head, HeadState::branch("main"));
        assert_eq!(state.branches["main"].head_commit_hash, "0000001");
        assert_eq!(state.commits["0000001"].timestamp, 1_700_000_000_000);
        assert!(state.working_directory.contains_key("README.md"));
        assert_eq!(state.command_history, vec!["git init"]);
        assert_eq!(repo.last_output(), "Initialized empty Git repository");
    }

    #[test]
    fn test_add_skips_unmodified_files() {
        let mut repo = initialised();
        repo.add(AddTarget::All);

        assert!(repo.state().staging_area.is_empty());
        assert_eq!(repo.last_output(), "Added 1 file(s) to staging area");
    }

    #[test]
    fn test_add_stages_modified_file() {
        let mut repo = initialised();
        repo.modify_file("README.md", Some("New content"));
        repo.add(AddTarget::Paths(vec!["README.md".to_string(), "nope".to_string()]));

        let state = repo.state();
        assert_eq!(state.staging_area["README.md"].status, FileStatus::Staged);
        assert_eq!(state.staging_area["README.md"].content, "New content");
        assert_eq!(state.working_directory["README.md"].status, FileStatus::Staged);
        assert_eq!(state.command_history.last().unwrap(), "git add README.md nope");
    }

    #[test]
    fn test_modify_without_content_appends_marker() {
        let mut repo = initialised();
        repo.modify_file("README.md", None);

        let entry = &repo.state().working_directory["README.md"];
        assert!(entry.content.ends_with(MODIFY_MARKER));
        assert_eq!(entry.status, FileStatus::Modified);
    }

    #[test]
    fn test_modify_keeps_added_status() {
        let mut repo = initialised();
        assert!(repo.create_file("notes.txt", "draft"));
        repo.modify_file("notes.txt", Some("final"));

        assert_eq!(repo.state().working_directory["notes.txt"].status, FileStatus::Added);
        assert_eq!(repo.status().untracked, vec!["notes.txt"]);
    }

    #[test]
    fn test_modify_unknown_path_is_silent() {
        let mut repo = initialised();
        let before = repo.state().clone();
        repo.modify_file("missing.txt", Some("x"));
        assert_eq!(repo.state(), &before);
    }

    #[test]
    fn test_commit_without_staged_changes_fails() {
        let mut repo = initialised();
        assert!(!repo.commit("nothing"));
        assert_eq!(repo.last_output(), "Nothing to commit (no staged changes)");
        assert_eq!(repo.state().commits.len(), 1);
    }

    #[test]
    fn test_commit_advances_branch_and_cleans_tree() {
        let mut repo = initialised();
        let hash = commit_change(&mut repo, "X", "m");

        let state = repo.state();
        assert_eq!(state.commits.len(), 2);
        assert_eq!(state.branches["main"].head_commit_hash, hash);
        assert_eq!(state.commits[&hash].parents, vec!["0000001"]);
        assert!(state.staging_area.is_empty());
        assert!(state
            .working_directory
            .values()
            .all(|entry| entry.status == FileStatus::Unmodified));
        assert_eq!(repo.last_output(), "[main 0000002] m");
        assert_eq!(state.command_history.last().unwrap(), "git commit -m \"m\"");
    }

    #[test]
    fn test_detached_commit_moves_head_only() {
        let mut repo = initialised();
        assert!(repo.checkout("0000001"));
        let hash = commit_change(&mut repo, "detached work", "dangling");

        let state = repo.state();
        assert_eq!(state.head, HeadState::detached(hash.clone()));
        assert_eq!(state.branches["main"].head_commit_hash, "0000001");
        assert!(state.branches.values().all(|b| b.head_commit_hash != hash));
    }

    #[test]
    fn test_checkout_unknown_ref_changes_only_output() {
        let mut repo = initialised();
        repo.modify_file("README.md", Some("dirty"));
        repo.add(AddTarget::All);
        let before = repo.state().clone();

        assert!(!repo.checkout("nowhere"));

        let after = repo.state();
        assert_eq!(after.commits, before.commits);
        assert_eq!(after.branches, before.branches);
        assert_eq!(after.tags, before.tags);
        assert_eq!(after.head, before.head);
        assert_eq!(after.working_directory, before.working_directory);
        assert_eq!(after.staging_area, before.staging_area);
        assert_eq!(after.command_history, before.command_history);
        assert_eq!(
            repo.last_output(),
            "error: pathspec 'nowhere' did not match any file(s) known to git"
        );
    }

    #[test]
    fn test_checkout_prefers_branch_over_hash() {
        let mut repo = initialised();
        // A branch whose name collides with a commit hash
        assert!(repo.branch("0000001"));
        assert!(repo.checkout("0000001"));
        assert_eq!(repo.state().head, HeadState::branch("0000001"));
    }

    #[test]
    fn test_branch_then_checkout() {
        let mut repo = initialised();
        assert!(repo.branch("feature"));
        assert!(repo.checkout("feature"));

        let state = repo.state();
        assert_eq!(state.head.reference(), "feature");
        assert!(!state.head.is_detached());
        assert_eq!(repo.current_branch(), Some("feature"));
    }

    #[test]
    fn test_duplicate_branch_is_refused() {
        let mut repo = initialised();
        assert!(repo.branch("feature"));
        let before = repo.state().branches.clone();

        assert!(!repo.branch("feature"));
        assert_eq!(repo.state().branches, before);
        assert_eq!(
            repo.last_output(),
            "fatal: A branch named 'feature' already exists"
        );
    }

    #[test]
    fn test_branch_before_init_is_refused() {
        let mut repo = repo();
        assert!(!repo.branch("feature"));
        assert!(repo.state().branches.is_empty());
    }

    #[test]
    fn test_fast_forward_merge() {
        let mut repo = initialised();
        let c1 = repo.head_commit().unwrap().hash.clone();
        repo.branch("feature");
        repo.checkout("feature");
        let c2 = commit_change(&mut repo, "feature work", "feature");
        repo.checkout("main");

        let outcome = repo.merge("feature");

        assert_eq!(
            outcome,
            MergeOutcome {
                success: true,
                conflict: false
            }
        );
        let state = repo.state();
        assert_eq!(state.commits[&c2].parents, vec![c1]);
        assert_eq!(state.branches["main"].head_commit_hash, c2);
        assert_eq!(state.commits.len(), 2);
        assert_eq!(state.working_directory["README.md"].content, "feature work");
        assert_eq!(repo.last_output(), "Fast-forward merge: main -> feature");
    }

    #[test]
    fn test_three_way_merge() {
        let mut repo = initialised();
        repo.branch("feature");
        repo.checkout("feature");
        repo.create_file("feature.txt", "feature");
        repo.add(AddTarget::All);
        repo.commit("feature file");
        let feature_head = repo.head_commit().unwrap().hash.clone();

        repo.checkout("main");
        let main_head = commit_change(&mut repo, "main work", "main change");

        let outcome = repo.merge("feature");
        assert!(outcome.success);
        assert!(!outcome.conflict);

        let state = repo.state();
        assert_eq!(state.commits.len(), 4);
        let merge = repo.head_commit().unwrap();
        assert_eq!(merge.parents, vec![main_head, feature_head]);
        assert_eq!(merge.message, "Merge branch 'feature' into main");
        // Source wins on shared paths; both sides' files survive
        assert_eq!(merge.tree["README.md"].content, "# My Project\n\nWelcome to my Git repository!");
        assert!(merge.tree.contains_key("feature.txt"));
        assert_eq!(state.working_directory, merge.tree);
    }

    #[test]
    fn test_merge_preconditions() {
        let mut repo = initialised();
        let outcome = repo.merge("ghost");
        assert!(!outcome.success);
        assert_eq!(repo.last_output(), "fatal: 'ghost' is not a valid branch");

        repo.branch("feature");
        repo.checkout("0000001");
        let before = repo.state().commits.clone();
        let outcome = repo.merge("feature");
        assert!(!outcome.success);
        assert_eq!(repo.last_output(), "Cannot merge into detached HEAD state");
        assert_eq!(repo.state().commits, before);
    }

    #[test]
    fn test_merge_same_commit_is_up_to_date() {
        let mut repo = initialised();
        repo.branch("feature");
        assert!(repo.merge("feature").success);
        assert_eq!(repo.last_output(), "Already up to date.");
        assert_eq!(repo.state().commits.len(), 1);
    }

    #[test]
    fn test_merge_same_commit_restores_working_directory() {
        let mut repo = initialised();
        repo.branch("feature");
        repo.modify_file("README.md", Some("dirty"));

        assert!(repo.merge("feature").success);

        let readme = &repo.state().working_directory["README.md"];
        assert_eq!(readme.content, "# My Project\n\nWelcome to my Git repository!");
        assert_eq!(readme.status, FileStatus::Unmodified);
        assert_eq!(repo.state().branches["main"].head_commit_hash, "0000001");
    }

    #[test]
    fn test_reset_at_root_is_refused() {
        let mut repo = initialised();
        assert!(!repo.reset(ResetMode::Hard, None));
        assert_eq!(repo.state().branches["main"].head_commit_hash, "0000001");
        assert_eq!(repo.last_output(), "Cannot reset: this is the root commit");
    }

    #[test]
    fn test_reset_to_unknown_ref_is_refused() {
        let mut repo = initialised();
        commit_change(&mut repo, "v2", "second");
        assert!(!repo.reset(ResetMode::Hard, Some("zzzzzzz")));
        assert_eq!(repo.state().branches["main"].head_commit_hash, "0000002");
        assert_eq!(repo.last_output(), "fatal: 'zzzzzzz' is not a valid commit");
    }

    #[test]
    fn test_hard_reset_restores_parent_tree() {
        let mut repo = initialised();
        commit_change(&mut repo, "v2", "second");
        repo.modify_file("README.md", Some("v3"));
        repo.add(AddTarget::All);

        assert!(repo.reset(ResetMode::Hard, None));

        let state = repo.state();
        assert_eq!(state.branches["main"].head_commit_hash, "0000001");
        assert!(state.staging_area.is_empty());
        assert_eq!(
            state.working_directory["README.md"].content,
            "# My Project\n\nWelcome to my Git repository!"
        );
        assert_eq!(repo.last_output(), "HEAD is now at 0000001");
        assert_eq!(state.command_history.last().unwrap(), "git reset --hard HEAD~1");
    }

    #[test]
    fn test_soft_reset_leaves_tree_and_staging() {
        let mut repo = initialised();
        commit_change(&mut repo, "v2", "second");
        let tree_before = repo.state().working_directory.clone();

        assert!(repo.reset(ResetMode::Soft, None));

        let state = repo.state();
        assert_eq!(state.branches["main"].head_commit_hash, "0000001");
        assert_eq!(state.working_directory, tree_before);
        assert!(state.staging_area.is_empty());
        assert_eq!(state.command_history.last().unwrap(), "git reset --soft HEAD~1");
        assert!(repo.last_output().starts_with("Unstaged changes after reset:"));
    }

    #[test]
    fn test_reset_with_explicit_ref_records_head_tilde_one() {
        let mut repo = initialised();
        commit_change(&mut repo, "v2", "second");
        commit_change(&mut repo, "v3", "third");

        assert!(repo.reset(ResetMode::Hard, Some("0000002")));
        assert_eq!(repo.state().branches["main"].head_commit_hash, "0000001");
        assert_eq!(
            repo.state().command_history.last().unwrap(),
            "git reset --hard HEAD~1"
        );
    }

    #[test]
    fn test_detached_reset_does_not_move_head() {
        let mut repo = initialised();
        commit_change(&mut repo, "v2", "second");
        repo.checkout("0000002");

        assert!(repo.reset(ResetMode::Hard, None));
        assert_eq!(repo.state().head, HeadState::detached("0000002"));
        assert_eq!(repo.state().branches["main"].head_commit_hash, "0000002");
    }

    #[test]
    fn test_log_follows_first_parent() {
        let mut repo = initialised();
        commit_change(&mut repo, "v2", "second");
        commit_change(&mut repo, "v3", "third");

        let messages: Vec<&str> = repo.log().iter().map(|c| c.message.as_str()).collect();
        assert_eq!(messages, vec!["third", "second", "Initial commit"]);
        assert!(repo.is_ancestor("0000001", "0000003"));
        assert!(!repo.is_ancestor("0000003", "0000001"));
    }

    #[test]
    fn test_log_before_init_is_empty() {
        assert!(repo().log().is_empty());
    }

    #[test]
    fn test_status_projection() {
        let mut repo = initialised();
        repo.create_file("new.txt", "");
        repo.create_file("edit.txt", "");
        repo.modify_file("README.md", None);
        repo.add(AddTarget::Paths(vec!["README.md".to_string()]));

        let report = repo.status();
        assert_eq!(report.staged, vec!["README.md"]);
        assert!(report.modified.is_empty());
        assert_eq!(report.untracked, vec!["edit.txt", "new.txt"]);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_tag_overwrites_silently() {
        let mut repo = initialised();
        assert!(repo.tag("v1"));
        commit_change(&mut repo, "v2", "second");
        assert!(repo.tag("v1"));

        assert_eq!(repo.state().tags["v1"], "0000002");
        assert_eq!(repo.last_output(), "Created tag 'v1' at 0000002");
    }

    #[test]
    fn test_tag_without_commit_creates_nothing() {
        let mut repo = repo();
        repo.report("previous output");
        let before = repo.state().clone();

        assert!(!repo.tag("v1"));
        assert_eq!(repo.state(), &before);
        assert_eq!(repo.last_output(), "previous output");
    }

    #[test]
    fn test_list_tags() {
        let mut repo = initialised();
        assert!(repo.list_tags().is_empty());
        assert_eq!(repo.last_output(), "No tags found");

        repo.tag("v2");
        repo.tag("v1");
        assert_eq!(repo.list_tags(), vec!["v1", "v2"]);
        assert_eq!(repo.last_output(), "v1\nv2");
        assert_eq!(repo.state().command_history.last().unwrap(), "git tag");
    }

    #[test]
    fn test_reset_state() {
        let mut repo = initialised();
        repo.reset_state();
        assert_eq!(repo.state(), &RepoState::default());
    }

    #[test]
    fn test_load_scenario_round_trip() {
        let mut source = initialised();
        commit_change(&mut source, "v2", "second");
        let snapshot = source.state().clone();

        let mut target = repo();
        assert!(target.load_scenario(ScenarioPatch::from(snapshot.clone())));
        assert_eq!(target.state(), &snapshot);
    }

    #[test]
    fn test_load_scenario_rejects_broken_graph() {
        let mut repo = initialised();
        let before = repo.state().clone();

        let patch = ScenarioPatch {
            head: Some(HeadState::branch("ghost")),
            ..Default::default()
        };
        assert!(!repo.load_scenario(patch));

        assert_eq!(repo.state().head, before.head);
        assert_eq!(repo.state().commits, before.commits);
        assert!(repo.last_output().contains("invalid scenario"));
    }

    #[test]
    fn test_init_twice_keeps_existing_commits() {
        let mut repo = initialised();
        repo.branch("feature");
        repo.init();

        let state = repo.state();
        assert_eq!(state.commits.len(), 2);
        assert_eq!(state.branches["main"].head_commit_hash, "0000002");
        assert!(state.branches.contains_key("feature"));
        assert_eq!(state.command_history, vec!["git init", "git branch feature", "git init"]);
    }
}
