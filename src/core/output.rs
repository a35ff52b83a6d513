//! Terminal presentation for the `git-sim` binary.
//!
//! # Design Principles
//! - **One colour scheme**: red for errors, green for success, blue for headers
//! - **Command output stays verbatim**: colour is added per line, text is never changed

use crate::core::colors::colorize_output_line;
use colored::*;

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    eprintln!("\n{} {}\n", "✕ Error:".red(), message.white());
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message.white());
}

pub fn print_info(message: &str) {
    println!("{}", message.white());
}

pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.blue());
}

/// Print the text returned by the dispatcher, colouring each line by its meaning
pub fn print_command_output(output: &str) {
    for line in output.lines() {
        println!("{}", colorize_output_line(line));
    }
}

/// The REPL prompt: `(<head ref>) $ `
pub fn format_prompt(head_ref: &str) -> String {
    format!("{}{}{} $ ", "(".bright_black(), head_ref.blue(), ")".bright_black())
}
