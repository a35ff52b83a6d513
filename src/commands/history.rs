use crate::core::{error::SimulatorError, repository::Repository, state::Commit};
use chrono::{DateTime, Local};

/// `git log`: first-parent history from HEAD
pub fn execute_log(repo: &mut Repository) {
    if repo.head_commit().is_none() {
        let head = repo.state().head.reference().to_string();
        repo.report_error(SimulatorError::no_commit_checked_out(head));
        return;
    }

    let output = repo
        .log()
        .iter()
        .map(|commit| format_log_entry(commit))
        .collect::<Vec<_>>()
        .join("\n\n");
    repo.report(output);
}

pub fn format_log_entry(commit: &Commit) -> String {
    format!(
        "commit {}\nAuthor: {}\nDate: {}\n\n    {}",
        commit.hash,
        commit.author,
        format_timestamp(commit.timestamp),
        commit.message
    )
}

/// Local time in git's default date layout, or the raw millis when out of range
fn format_timestamp(millis: i64) -> String {
    match DateTime::from_timestamp_millis(millis) {
        Some(utc) => utc
            .with_timezone(&Local)
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string(),
        None => millis.to_string(),
    }
}
