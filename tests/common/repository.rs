//! Repository and snapshot-store setup utilities
//!
//! Provides deterministic repositories (sequential hashes, fixed clock) and
//! temporary snapshot directories for driving the `git-sim` binary.

#![allow(dead_code)]

use assert_cmd::Command;
use git_simulator::{FixedClock, Repository, SequentialHashGenerator, SimulatorConfig};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Milliseconds every test commit is stamped with
pub const FIXED_TIMESTAMP: i64 = 1_700_000_000_000;

/// Repository whose hashes are `0000001`, `0000002`, ... in creation order
pub fn test_repo() -> Repository {
    test_repo_with_config(SimulatorConfig::default())
}

pub fn test_repo_with_config(config: SimulatorConfig) -> Repository {
    Repository::with_providers(
        config,
        Box::new(SequentialHashGenerator::new()),
        Box::new(FixedClock(FIXED_TIMESTAMP)),
    )
}

/// Temporary snapshot directory plus an isolated config home. The TempDir must be
/// kept alive for the duration of the test to prevent cleanup.
pub struct TestStore {
    pub temp_dir: TempDir,
    pub store_dir: PathBuf,
    pub config_home: PathBuf,
}

impl TestStore {
    pub fn path(&self) -> &Path {
        &self.store_dir
    }

    /// Path of the snapshot file saved for `scenario`
    pub fn snapshot_file(&self, scenario: &str) -> PathBuf {
        self.store_dir.join(format!("gitmaster-level-{scenario}.json"))
    }
}

pub fn setup_test_store() -> anyhow::Result<TestStore> {
    let temp_dir = TempDir::new()?;
    let store_dir = temp_dir.path().join("scenarios");
    let config_home = temp_dir.path().join("config");
    std::fs::create_dir_all(&config_home)?;

    Ok(TestStore {
        temp_dir,
        store_dir,
        config_home,
    })
}

/// `git-sim --store-dir <store>` with the config directory pointed into the store
pub fn git_sim(store: &TestStore) -> anyhow::Result<Command> {
    let mut cmd = Command::cargo_bin("git-sim")?;
    cmd.env("XDG_CONFIG_HOME", &store.config_home)
        .env("HOME", store.temp_dir.path())
        .arg("--store-dir")
        .arg(&store.store_dir);
    Ok(cmd)
}

/// Run `git-sim exec <line>` and require success
pub fn exec(store: &TestStore, scenario: &str, line: &str) -> anyhow::Result<()> {
    git_sim(store)?
        .args(["--scenario", scenario, "exec"])
        .args(line.split_whitespace())
        .assert()
        .success();
    Ok(())
}
