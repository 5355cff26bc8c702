//! Application configuration
//!
//! Settings come from `config.json` under the user config directory, with
//! command-line flags and environment variables taking precedence.

use crate::auth::default_token_path;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Which storage backend to use, decided once at startup
#[derive(Debug, Clone, PartialEq)]
pub enum StorageConfig {
    Local { path: PathBuf },
    Remote { base_url: String },
}

/// Contents of `config.json`; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileConfig {
    pub api_base: Option<String>,
    pub store: Option<PathBuf>,
    pub token_file: Option<PathBuf>,
    pub debounce_ms: Option<u64>,
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_base: Option<String>,
    pub store: Option<PathBuf>,
    pub token_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub storage: StorageConfig,
    pub token_file: PathBuf,
    pub debounce: Duration,
}

impl Config {
    /// Read the config file and apply overrides
    pub fn load(overrides: Overrides) -> Result<Self> {
        let file = load_file_config(&config_path()?)?;
        let defaults = Defaults {
            store: default_store_path()?,
            token_file: default_token_path()?,
        };
        Ok(Self::resolve(file, overrides, defaults))
    }

    fn resolve(file: FileConfig, overrides: Overrides, defaults: Defaults) -> Self {
        let api_base = overrides
            .api_base
            .or(file.api_base)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let storage = match api_base {
            Some(base_url) => StorageConfig::Remote { base_url },
            None => StorageConfig::Local {
                path: overrides.store.or(file.store).unwrap_or(defaults.store),
            },
        };
        debug!("Storage backend: {:?}", storage);

        Config {
            storage,
            token_file: overrides
                .token_file
                .or(file.token_file)
                .unwrap_or(defaults.token_file),
            debounce: file
                .debounce_ms
                .map(Duration::from_millis)
                .unwrap_or(crate::search::DEFAULT_DEBOUNCE),
        }
    }
}

struct Defaults {
    store: PathBuf,
    token_file: PathBuf,
}

/// Path to `config.json`
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Cannot determine config directory")?;
    Ok(config_dir.join("recipebox").join("config.json"))
}

fn default_store_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().context("Cannot determine data directory")?;
    Ok(data_dir.join("recipebox").join("recipes.json"))
}

/// Missing file gives the default config
pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }

    let data = fs::read_to_string(path).context("Failed to read config file")?;
    let config = serde_json::from_str(&data).context("Failed to parse config file")?;
    Ok(config)
}
