//! Branch palette and terminal colours.
//!
//! # Public API
//! - [`BRANCH_PALETTE`]: Display colours handed out to branches
//! - [`branch_color`]: Colour for a branch, derived from its name
//! - [`get_status_color_style`]: Terminal colour for a file status
//! - [`colorize_output_line`]: Colour one line of dispatcher output
//!
//! Branch colours are a pure function of the branch name, so two repositories that
//! create the same branches always agree on colours and snapshots reload identically.

use crate::core::file_status::FileStatus;
use colored::*;

pub const BRANCH_PALETTE: [&str; 6] = [
    "hsl(199, 89%, 48%)", // sky
    "hsl(280, 68%, 60%)", // purple
    "hsl(142, 76%, 36%)", // green
    "hsl(38, 92%, 50%)",  // amber
    "hsl(0, 84%, 60%)",   // red
    "hsl(172, 66%, 50%)", // teal
];

/// Palette colour for `name`. The default branch always gets the first colour.
pub fn branch_color(name: &str, default_branch: &str) -> &'static str {
    if name == default_branch {
        return BRANCH_PALETTE[0];
    }
    let digest = md5::compute(name.as_bytes());
    BRANCH_PALETTE[digest.0[0] as usize % BRANCH_PALETTE.len()]
}

/// Returns a closure that applies the colour for a file status
pub fn get_status_color_style(status: FileStatus) -> Box<dyn Fn(&str) -> ColoredString> {
    match status {
        FileStatus::Staged => Box::new(|text: &str| text.green()),
        FileStatus::Modified => Box::new(|text: &str| text.yellow()),
        FileStatus::Added => Box::new(|text: &str| text.cyan()),
        FileStatus::Deleted => Box::new(|text: &str| text.red()),
        FileStatus::Unmodified => Box::new(|text: &str| text.normal()),
    }
}

/// Colour a single line of command output for the terminal
pub fn colorize_output_line(line: &str) -> ColoredString {
    let trimmed = line.trim_start();
    if trimmed.starts_with("fatal:") || trimmed.starts_with("error:") {
        line.red()
    } else if trimmed.starts_with("staged:") {
        get_status_color_style(FileStatus::Staged)(line)
    } else if trimmed.starts_with("modified:") {
        get_status_color_style(FileStatus::Modified)(line)
    } else if line.starts_with("commit ") {
        line.yellow()
    } else if line.starts_with("* ") {
        line.green()
    } else {
        line.normal()
    }
}
