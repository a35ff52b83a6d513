//! Tokenising `git <subcommand> [args]` lines into typed commands.
//!
//! # Public API
//! - [`CommandParser`]: Turns one input line into a [`ParsedCommand`]
//! - [`ParsedCommand`]: Every command the dispatcher understands
//!
//! Arguments are split on runs of whitespace, so quoting only matters for commit
//! messages, where one pair of surrounding quotes is stripped after the words are
//! joined back together.

use crate::core::{
    error::{Result, SimulatorError},
    repository::{AddTarget, ResetMode},
};

pub const COMMIT_USAGE: &str = "git commit -m \"message\"";
pub const ADD_USAGE: &str = "git add <. | path...>";
pub const CHECKOUT_USAGE: &str = "git checkout [-b] <branch | commit>";
pub const BRANCH_USAGE: &str = "git branch [name]";
pub const MERGE_USAGE: &str = "git merge <branch>";
pub const RESET_USAGE: &str = "git reset [--soft | --hard] [<commit>]";
pub const TAG_USAGE: &str = "git tag [name]";

/// Subcommands in the order `git help` lists them
pub const SUBCOMMANDS: [(&str, &str); 10] = [
    ("init", "Create the repository and its first commit"),
    ("add", "Stage changed files"),
    ("commit", "Record staged changes"),
    ("checkout", "Switch branches or detach HEAD at a commit"),
    ("branch", "List or create branches"),
    ("merge", "Merge a branch into the current one"),
    ("reset", "Move the current branch back one commit"),
    ("log", "Show first-parent history"),
    ("status", "Show the working tree status"),
    ("tag", "List or create tags"),
];

/// HEAD spellings that mean "the default reset target"
const HEAD_ALIASES: [&str; 3] = ["HEAD", "HEAD~1", "HEAD^"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    Help,
    Init,
    Add(AddTarget),
    Commit { message: String },
    Checkout { reference: String, create: bool },
    /// `None` lists branches
    Branch(Option<String>),
    Merge(String),
    Reset {
        mode: ResetMode,
        reference: Option<String>,
    },
    Log,
    Status,
    /// `None` lists tags
    Tag(Option<String>),
}

pub struct CommandParser;

impl CommandParser {
    pub fn parse(line: &str) -> Result<ParsedCommand> {
        let mut tokens = line.split_whitespace();

        let program = tokens.next().unwrap_or_default();
        if program != "git" {
            return Err(SimulatorError::command_not_found(program));
        }

        let Some(subcommand) = tokens.next() else {
            return Ok(ParsedCommand::Help);
        };
        let args: Vec<&str> = tokens.collect();
        log::debug!("Parsing git {subcommand} with {} argument(s)", args.len());

        match subcommand {
            "help" => Ok(ParsedCommand::Help),
            "init" => Ok(ParsedCommand::Init),
            "add" => Self::parse_add(&args),
            "commit" => Self::parse_commit(&args),
            "checkout" => Self::parse_checkout(&args),
            "branch" => Self::parse_optional_name(&args, BRANCH_USAGE).map(ParsedCommand::Branch),
            "merge" => match args.as_slice() {
                [source] => Ok(ParsedCommand::Merge(source.to_string())),
                _ => Err(SimulatorError::usage(MERGE_USAGE)),
            },
            "reset" => Self::parse_reset(&args),
            "log" => Ok(ParsedCommand::Log),
            "status" => Ok(ParsedCommand::Status),
            "tag" => Self::parse_optional_name(&args, TAG_USAGE).map(ParsedCommand::Tag),
            other => Err(SimulatorError::not_a_git_command(other)),
        }
    }

    fn parse_add(args: &[&str]) -> Result<ParsedCommand> {
        match args {
            [] => Err(SimulatorError::usage(ADD_USAGE)),
            ["."] => Ok(ParsedCommand::Add(AddTarget::All)),
            paths => Ok(ParsedCommand::Add(AddTarget::Paths(
                paths.iter().map(|p| p.to_string()).collect(),
            ))),
        }
    }

    fn parse_commit(args: &[&str]) -> Result<ParsedCommand> {
        match args {
            ["-m", words @ ..] if !words.is_empty() => Ok(ParsedCommand::Commit {
                message: strip_quotes(&words.join(" ")).to_string(),
            }),
            _ => Err(SimulatorError::usage(COMMIT_USAGE)),
        }
    }

    fn parse_checkout(args: &[&str]) -> Result<ParsedCommand> {
        match args {
            ["-b", name] => Ok(ParsedCommand::Checkout {
                reference: name.to_string(),
                create: true,
            }),
            [reference] if !reference.starts_with('-') => Ok(ParsedCommand::Checkout {
                reference: reference.to_string(),
                create: false,
            }),
            _ => Err(SimulatorError::usage(CHECKOUT_USAGE)),
        }
    }

    fn parse_reset(args: &[&str]) -> Result<ParsedCommand> {
        let mut mode = ResetMode::Soft;
        let mut reference = None;

        for arg in args {
            match *arg {
                "--soft" => mode = ResetMode::Soft,
                "--hard" => mode = ResetMode::Hard,
                alias if HEAD_ALIASES.contains(&alias) => {}
                flag if flag.starts_with('-') => return Err(SimulatorError::usage(RESET_USAGE)),
                explicit => {
                    if reference.replace(explicit.to_string()).is_some() {
                        return Err(SimulatorError::usage(RESET_USAGE));
                    }
                }
            }
        }

        Ok(ParsedCommand::Reset { mode, reference })
    }

    fn parse_optional_name(args: &[&str], usage: &str) -> Result<Option<String>> {
        match args {
            [] => Ok(None),
            [name] if !name.starts_with('-') => Ok(Some(name.to_string())),
            _ => Err(SimulatorError::usage(usage)),
        }
    }
}

/// Remove one leading and one trailing quote character, if present
fn strip_quotes(text: &str) -> &str {
    let text = text.strip_prefix(['"', '\'']).unwrap_or(text);
    text.strip_suffix(['"', '\'']).unwrap_or(text)
}
