//! Configuration file management for directory providers.
//!
//! Supports reading provider settings from `~/.config/handover/directory.json`,
//! with an environment override for ad-hoc setups.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use handover_core::error::{HandoverError, Result};

/// Environment variable overriding the directory endpoint.
pub const DIRECTORY_URL_ENV: &str = "HANDOVER_DIRECTORY_URL";
/// Environment variable carrying the API key alongside the URL override.
pub const DIRECTORY_KEY_ENV: &str = "HANDOVER_DIRECTORY_KEY";

/// Settings for the HTTP directory client.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    /// Base URL of the directory service
    pub base_url: String,
    /// Bearer token, if the service requires one
    #[serde(default)]
    pub api_key: Option<String>,
    /// Per-request timeout; the engine itself carries no timeout policy
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Loads the directory configuration.
///
/// The `HANDOVER_DIRECTORY_URL` environment variable wins when set;
/// otherwise the configuration file at
/// `~/.config/handover/directory.json` is read.
pub fn load_directory_config() -> Result<DirectoryConfig> {
    if let Ok(base_url) = std::env::var(DIRECTORY_URL_ENV) {
        return Ok(DirectoryConfig {
            base_url,
            api_key: std::env::var(DIRECTORY_KEY_ENV).ok(),
            timeout_secs: None,
        });
    }
    load_from_path(&config_path()?)
}

/// Loads the configuration from an explicit path.
pub fn load_from_path(path: &Path) -> Result<DirectoryConfig> {
    if !path.exists() {
        return Err(HandoverError::config(format!(
            "Configuration file not found at: {}",
            path.display()
        )));
    }

    let content = fs::read_to_string(path).map_err(|e| {
        HandoverError::config(format!(
            "Failed to read configuration file at {}: {}",
            path.display(),
            e
        ))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        HandoverError::config(format!(
            "Failed to parse configuration file at {}: {}",
            path.display(),
            e
        ))
    })
}

/// Returns the path to the configuration file: ~/.config/handover/directory.json
fn config_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| HandoverError::config("Could not determine home directory"))?;
    Ok(home.join(".config").join("handover").join("directory.json"))
}
