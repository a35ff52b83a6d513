//! Core functionality for the git simulator.
//!
//! This module provides the repository state machine and everything it rests on:
//! the snapshot data model, commit graph walks, providers, configuration,
//! persistence and terminal presentation.

pub mod ancestry;
pub mod colors;
pub mod command_parser;
pub mod config;
pub mod dirs;
pub mod error;
pub mod file_status;
pub mod output;
pub mod providers;
pub mod repository;
pub mod state;
pub mod storage;

// === Error handling ===
pub use error::{Result, SimulatorError};

// === Snapshot data model ===
pub use file_status::FileStatus;
pub use state::{
    Branch, Commit, CommitHash, FileEntry, FileStructure, HeadState, RepoState, ScenarioPatch,
};

// === State machine ===
pub use repository::{AddTarget, MergeOutcome, Repository, ResetMode, StatusReport};

// === Commit graph ===
pub use ancestry::{is_ancestor, FirstParentWalk};

// === Providers ===
// Injected so tests get deterministic hashes and timestamps
pub use providers::{
    Clock, FixedClock, HashGenerator, RandomHashGenerator, SequentialHashGenerator, SystemClock,
};

// === Command parsing ===
pub use command_parser::{CommandParser, ParsedCommand};

// === Configuration ===
pub use config::SimulatorConfig;

// === Persistence ===
pub use storage::{FileBackend, MemoryBackend, SnapshotBackend, SnapshotStore};

// === Color system ===
pub use colors::{branch_color, colorize_output_line, get_status_color_style, BRANCH_PALETTE};

// === Output formatting ===
pub use output::{
    format_prompt, print_command_output, print_error, print_info, print_section_header,
    print_success,
};
