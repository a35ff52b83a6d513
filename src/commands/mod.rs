//! The command dispatcher.
//!
//! [`execute_command`] parses one `git <subcommand> [args]` line, routes it to the
//! matching `execute_*` function and returns the repository's `last_output`. Lines
//! that do not parse only replace `last_output`; they never reach the state machine
//! and never enter the command history.

pub mod add;
pub mod branches;
pub mod checkout;
pub mod commit;
pub mod history;
pub mod merge;
pub mod reset;
pub mod status;
pub mod tag;

pub use add::*;
pub use branches::*;
pub use checkout::*;
pub use commit::*;
pub use history::*;
pub use merge::*;
pub use reset::*;
pub use status::*;
pub use tag::*;

use crate::core::{
    command_parser::{CommandParser, ParsedCommand, SUBCOMMANDS},
    repository::Repository,
};

pub fn execute_command(repo: &mut Repository, line: &str) -> String {
    match CommandParser::parse(line) {
        Ok(command) => dispatch(repo, command),
        Err(e) => {
            log::debug!("Rejected input {line:?}: {e}");
            repo.report_error(e);
        }
    }
    repo.last_output().to_string()
}

fn dispatch(repo: &mut Repository, command: ParsedCommand) {
    match command {
        ParsedCommand::Help => repo.report(help_text()),
        ParsedCommand::Init => execute_init(repo),
        ParsedCommand::Add(target) => execute_add(repo, target),
        ParsedCommand::Commit { message } => execute_commit(repo, &message),
        ParsedCommand::Checkout { reference, create } => {
            execute_checkout(repo, &reference, create)
        }
        ParsedCommand::Branch(name) => execute_branch(repo, name.as_deref()),
        ParsedCommand::Merge(source) => {
            execute_merge(repo, &source);
        }
        ParsedCommand::Reset { mode, reference } => {
            execute_reset(repo, mode, reference.as_deref())
        }
        ParsedCommand::Log => execute_log(repo),
        ParsedCommand::Status => execute_status(repo),
        ParsedCommand::Tag(name) => execute_tag(repo, name.as_deref()),
    }
}

pub fn help_text() -> String {
    let width = SUBCOMMANDS
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or_default();
    let mut lines = vec!["usage: git <command> [<args>]".to_string(), String::new()];
    lines.extend(
        SUBCOMMANDS
            .iter()
            .map(|(name, about)| format!("   {name:<width$}   {about}")),
    );
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_every_subcommand() {
        let help = help_text();
        for (name, _) in SUBCOMMANDS {
            assert!(help.contains(name), "missing {name}");
        }
    }

    #[test]
    fn test_rejected_lines_change_only_output() {
        let mut repo = Repository::new();
        execute_command(&mut repo, "git init");
        let before = repo.state().clone();

        for line in ["ls", "git frobnicate", "git commit", "git merge", ""] {
            execute_command(&mut repo, line);
            let after = repo.state();
            assert_eq!(after.commits, before.commits);
            assert_eq!(after.command_history, before.command_history);
            assert_eq!(after.working_directory, before.working_directory);
        }
    }

    #[test]
    fn test_execute_command_returns_last_output() {
        let mut repo = Repository::new();
        let output = execute_command(&mut repo, "git init");
        assert_eq!(output, "Initialized empty Git repository");
        assert_eq!(output, repo.last_output());
    }
}
