//! Git Simulator - an in-memory model of a git repository for learning version control.
//!
//! The simulator keeps commits, branches, tags, HEAD, a staging area and a working
//! directory in one serialisable snapshot and drives it with textual
//! `git <subcommand>` lines. Nothing touches a real repository.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - The [`Repository`] state machine and its snapshot types
//! - Commit graph queries
//! - Keyed snapshot persistence
//! - Error handling and result types
//!
//! The textual front end lives in [`commands`], whose [`commands::execute_command`]
//! runs one command line against a repository.

pub mod commands;
pub mod core;

pub use commands::execute_command;

// Re-export the core public API for external users
pub use core::{
    // Commit graph
    is_ancestor,
    // State machine
    AddTarget,
    Branch,
    // Providers
    Clock,
    Commit,
    CommitHash,
    FileBackend,
    FileEntry,
    FileStatus,
    FileStructure,
    FixedClock,
    HashGenerator,
    HeadState,
    MemoryBackend,
    MergeOutcome,
    RandomHashGenerator,
    RepoState,
    Repository,
    ResetMode,
    // Error handling
    Result,
    ScenarioPatch,
    SequentialHashGenerator,
    SimulatorConfig,
    SimulatorError,
    // Persistence
    SnapshotBackend,
    SnapshotStore,
    StatusReport,
    SystemClock,
};
