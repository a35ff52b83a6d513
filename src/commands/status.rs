use crate::core::{
    repository::{Repository, StatusReport},
    state::{short_hash, HeadState},
};

/// `git status`
pub fn execute_status(repo: &mut Repository) {
    let output = format_status(&repo.state().head, &repo.status());
    repo.report(output);
}

pub fn format_status(head: &HeadState, report: &StatusReport) -> String {
    let mut output = match head {
        HeadState::Branch(name) => format!("On branch {name}\n"),
        HeadState::Detached(hash) => format!("HEAD detached at {}\n", short_hash(hash)),
    };

    if !report.staged.is_empty() {
        output.push_str("\nChanges to be committed:\n");
        output.push_str(&indent_lines(&report.staged, "staged: "));
    }
    if !report.modified.is_empty() {
        output.push_str("\nChanges not staged:\n");
        output.push_str(&indent_lines(&report.modified, "modified: "));
    }
    if !report.untracked.is_empty() {
        output.push_str("\nUntracked files:\n");
        output.push_str(&indent_lines(&report.untracked, ""));
    }
    if report.is_clean() {
        output.push_str("\nnothing to commit, working tree clean");
    }

    output
}

fn indent_lines(paths: &[String], label: &str) -> String {
    paths
        .iter()
        .map(|path| format!("  {label}{path}"))
        .collect::<Vec<_>>()
        .join("\n")
}
