//! Predefined repository scenarios
//!
//! Builds repositories in well-known shapes by driving them through the command
//! dispatcher, the same way a learner would.

#![allow(dead_code)]

use super::repository::*;
use git_simulator::{execute_command, Repository};

/// Run each line through the dispatcher, returning the last output
pub fn run(repo: &mut Repository, lines: &[&str]) -> String {
    lines
        .iter()
        .map(|line| execute_command(repo, line))
        .last()
        .unwrap_or_default()
}

/// Scenario: `git init` only. Root commit `0000001` on `main`.
pub fn initialised_repo() -> Repository {
    let mut repo = test_repo();
    run(&mut repo, &["git init"]);
    repo
}

/// Scenario: `main` with three linear commits `0000001` <- `0000002` <- `0000003`
pub fn linear_history_repo() -> Repository {
    let mut repo = initialised_repo();
    for (content, message) in [("v2", "second"), ("v3", "third")] {
        repo.modify_file("README.md", Some(content));
        run(&mut repo, &["git add .", &format!("git commit -m {message}")]);
    }
    repo
}

/// Scenario: `main` and `feature` diverged from the root commit.
///
/// `feature` (`0000002`) adds `feature.txt`; `main` (`0000003`) edits README.md.
/// HEAD is on `main`.
pub fn diverged_repo() -> Repository {
    let mut repo = initialised_repo();
    run(&mut repo, &["git checkout -b feature"]);
    repo.create_file("feature.txt", "feature work");
    run(
        &mut repo,
        &["git add feature.txt", "git commit -m \"Add feature\"", "git checkout main"],
    );
    repo.modify_file("README.md", Some("main work"));
    run(&mut repo, &["git add .", "git commit -m \"Edit readme\""]);
    repo
}
