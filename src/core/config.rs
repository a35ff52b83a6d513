use crate::core::dirs::get_config_directory;
use crate::core::error::{Result, SimulatorError};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_AUTHOR: &str = "You";

/// File every freshly initialised repository starts with
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SeedFile {
    pub path: String,
    pub content: String,
}

impl Default for SeedFile {
    fn default() -> Self {
        Self {
            path: "README.md".to_string(),
            content: "# My Project\n\nWelcome to my Git repository!".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    pub key_prefix: String,
    pub max_snapshot_bytes: usize,
    pub max_text_len: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key_prefix: "gitmaster-level-".to_string(),
            max_snapshot_bytes: 5 * 1024 * 1024,
            max_text_len: 10_000,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Author recorded on every commit
    pub author: String,
    pub default_branch: String,
    pub seed_file: SeedFile,
    pub storage: StorageConfig,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            author: DEFAULT_AUTHOR.to_string(),
            default_branch: DEFAULT_BRANCH.to_string(),
            seed_file: SeedFile::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl SimulatorConfig {
    /// Load `config.json` from the config directory, falling back to defaults when
    /// the directory or the file does not exist.
    pub fn load_or_default() -> Result<Self> {
        match get_config_directory() {
            Ok(config_dir) => Self::load_from(&config_dir.join("config.json")),
            Err(SimulatorError::ConfigDirectoryNotFound) => {
                log::debug!("No config directory available, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    pub fn load_from(config_file: &Path) -> Result<Self> {
        if !config_file.exists() {
            log::debug!(
                "Config file {} not found, using defaults",
                config_file.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_file)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            log::error!("Failed to parse config file '{}': {e}", config_file.display());
            SimulatorError::config_parse_failed(config_file, e)
        })?;

        log::debug!("Loaded config from {}", config_file.display());
        Ok(config)
    }
}
