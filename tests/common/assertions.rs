//! Common assertion helpers for command output validation
//!
//! Provides predicates for `git-sim` stdout and helpers that check repository
//! snapshots against the graph invariants every operation must preserve.

#![allow(dead_code)]

use git_simulator::{is_ancestor, HeadState, RepoState};
use predicates::prelude::*;

/// Creates a predicate that checks for the status header of a branch
pub fn on_branch(name: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("On branch {name}"))
}

pub fn clean_tree() -> impl Predicate<str> {
    predicates::str::contains("nothing to commit, working tree clean")
}

/// Creates a predicate that checks for a commit summary line `[<ref> <hash>] <msg>`
pub fn committed(reference: &str, message: &str) -> impl Predicate<str> {
    predicates::str::is_match(format!(r"\[{reference} [0-9a-f]{{7}}\] {message}"))
        .expect("valid regex")
}

/// Every parent, branch target and tag target resolves; HEAD is consistent;
/// staging keys are a subset of working keys.
pub fn assert_graph_consistent(state: &RepoState) {
    assert!(state.validate().is_ok(), "invalid state: {state:?}");
    for (hash, commit) in &state.commits {
        assert_eq!(hash, &commit.hash);
        for parent in &commit.parents {
            assert!(is_ancestor(&state.commits, parent, hash));
        }
    }
    if let HeadState::Branch(name) = &state.head {
        if !state.commits.is_empty() {
            assert!(state.branches.contains_key(name));
        }
    }
    for path in state.staging_area.keys() {
        assert!(state.working_directory.contains_key(path));
    }
}
