//! Keyed snapshot persistence.
//!
//! [`SnapshotStore`] saves and loads [`RepoState`] snapshots under per-scenario keys
//! on top of a pluggable [`SnapshotBackend`]. Every fault stays inside this module:
//! `save` and `clear` log and drop the operation, `load` logs and returns `None`. The
//! repository never sees a persistence error.
//!
//! # Safety checks
//! - **Keys**: `[a-zA-Z0-9_-]`, 1 to 99 characters; anything else is rejected
//! - **Size ceiling**: oversized payloads are not written
//! - **Sanitising**: free text in `lastOutput` is scrubbed before storage
//! - **Shape validation**: every loaded commit must carry string `hash`, `message`,
//!   `author` and a numeric `timestamp`

use crate::core::{
    config::StorageConfig,
    dirs::get_data_directory,
    error::{Result, SimulatorError},
    state::RepoState,
};
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

const MAX_KEY_LEN: usize = 100;

/// Raw string storage addressed by full (prefixed) keys
pub trait SnapshotBackend {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SnapshotBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per snapshot in a directory
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Backend rooted in the platform data directory
    pub fn in_data_dir() -> Result<Self> {
        Ok(Self::new(get_data_directory()?))
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl SnapshotBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            log::debug!("No snapshot file at {}", path.display());
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        let path = self.path_for(key);
        fs::write(&path, value)?;
        log::debug!("Wrote snapshot to {}", path.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

pub struct SnapshotStore<B: SnapshotBackend> {
    backend: B,
    config: StorageConfig,
}

impl<B: SnapshotBackend> SnapshotStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, StorageConfig::default())
    }

    pub fn with_config(backend: B, config: StorageConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Persist `state` under `key`. Returns whether the snapshot was written.
    pub fn save(&mut self, key: &str, state: &RepoState) -> bool {
        match self.try_save(key, state) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to save snapshot '{key}': {e}");
                false
            }
        }
    }

    /// Snapshot stored under `key`, or `None` when absent or invalid
    pub fn load(&self, key: &str) -> Option<RepoState> {
        match self.try_load(key) {
            Ok(state) => state,
            Err(e) => {
                log::error!("Failed to load snapshot '{key}': {e}");
                None
            }
        }
    }

    pub fn clear(&mut self, key: &str) {
        let result = self
            .storage_key(key)
            .and_then(|storage_key| self.backend.remove(&storage_key));
        if let Err(e) = result {
            log::error!("Failed to clear snapshot '{key}': {e}");
        }
    }

    fn storage_key(&self, key: &str) -> Result<String> {
        if !is_valid_key(key) {
            return Err(SimulatorError::invalid_storage_key(key));
        }
        Ok(format!("{}{key}", self.config.key_prefix))
    }

    fn try_save(&mut self, key: &str, state: &RepoState) -> Result<()> {
        let storage_key = self.storage_key(key)?;

        let mut sanitized = state.clone();
        sanitized.last_output = sanitize_text(&state.last_output, self.config.max_text_len);

        let serialized = serde_json::to_string(&sanitized)?;
        if serialized.len() > self.config.max_snapshot_bytes {
            return Err(SimulatorError::SnapshotTooLarge {
                size: serialized.len(),
                limit: self.config.max_snapshot_bytes,
            });
        }

        self.backend.set(&storage_key, &serialized)?;
        log::debug!("Saved snapshot '{key}' ({} bytes)", serialized.len());
        Ok(())
    }

    fn try_load(&self, key: &str) -> Result<Option<RepoState>> {
        let storage_key = self.storage_key(key)?;
        let Some(saved) = self.backend.get(&storage_key)? else {
            return Ok(None);
        };

        if !saved.starts_with('{') || !saved.ends_with('}') {
            return Err(SimulatorError::malformed_snapshot("not a JSON object"));
        }

        let value: serde_json::Value = serde_json::from_str(&saved)?;
        validate_commit_records(&value)?;

        let state: RepoState = serde_json::from_value(value)?;
        log::debug!(
            "Loaded snapshot '{key}' with {} commit(s)",
            state.commits.len()
        );
        Ok(Some(state))
    }
}

/// Keys must be short identifiers made of ASCII letters, digits, `_` and `-`
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() < MAX_KEY_LEN
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn script_scheme_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)javascript:").expect("static regex is valid"))
}

fn event_handler_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)on\w+=").expect("static regex is valid"))
}

/// Strip markup-significant characters, script URLs and inline event handlers, then
/// cap the length at `max_len` characters.
pub fn sanitize_text(text: &str, max_len: usize) -> String {
    let without_angles: String = text.chars().filter(|c| *c != '<' && *c != '>').collect();
    let without_scheme = script_scheme_regex().replace_all(&without_angles, "");
    let without_handlers = event_handler_regex().replace_all(&without_scheme, "");
    without_handlers.chars().take(max_len).collect()
}

fn validate_commit_records(value: &serde_json::Value) -> Result<()> {
    let Some(commits) = value.get("commits") else {
        return Ok(());
    };
    let Some(commits) = commits.as_object() else {
        return Err(SimulatorError::malformed_snapshot("commits is not an object"));
    };

    for (key, commit) in commits {
        let well_formed = commit.get("hash").is_some_and(|v| v.is_string())
            && commit.get("message").is_some_and(|v| v.is_string())
            && commit.get("author").is_some_and(|v| v.is_string())
            && commit.get("timestamp").is_some_and(|v| v.is_number());
        if !well_formed {
            return Err(SimulatorError::InvalidCommitRecord { key: key.clone() });
        }
    }
    Ok(())
}
