//! # Configuration Management Module
//!
//! TOML configuration for the `reallife-rpg` binary: where the save lives, how
//! chatty the logs are, and which content catalog and RNG seed the engine uses.
//!
//! ## Configuration Structure
//!
//! - [`StorageConfig`] - Save backend selection and data directory
//! - [`LoggingConfig`] - Log level and optional log file
//! - [`GameConfig`] - Optional RNG seed and catalog override
//!
//! ## Configuration File Format
//!
//! ```toml
//! [storage]
//! backend = "json"
//! data_dir = "./data"
//!
//! [logging]
//! level = "info"
//! file = "reallife-rpg.log"
//!
//! [game]
//! seed = 42
//! catalog = "content/catalog.json"
//! ```
//!
//! Every section and field may be omitted; missing values take the defaults
//! below.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::game::backends::{JsonFileBackend, MemoryBackend, SaveBackend, SledBackend};
use crate::game::content::Catalog;
use crate::game::seed_loader::load_catalog_from_json;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub game: GameConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    /// `<data_dir>/save.json`
    #[default]
    Json,
    /// sled database under `<data_dir>/sled`
    Sled,
    /// Nothing survives the process.
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackendKind,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    "./data".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendKind::Json,
            data_dir: default_data_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GameConfig {
    /// Fixed seed for quest rotation; entropy when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// JSON catalog replacing the built-in content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Create a default configuration file
    pub fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_dir)
    }

    /// Open the configured save backend.
    pub fn open_backend(&self) -> Result<Box<dyn SaveBackend>> {
        let backend: Box<dyn SaveBackend> = match self.storage.backend {
            StorageBackendKind::Json => Box::new(JsonFileBackend::in_dir(self.data_dir())),
            StorageBackendKind::Sled => {
                let path = self.data_dir().join("sled");
                Box::new(
                    SledBackend::open(&path)
                        .with_context(|| format!("Failed to open sled store {}", path.display()))?,
                )
            }
            StorageBackendKind::Memory => Box::new(MemoryBackend::new()),
        };
        Ok(backend)
    }

    /// The configured catalog, or the built-in content.
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.game.catalog {
            Some(path) => load_catalog_from_json(path)
                .with_context(|| format!("Failed to load catalog {}", path)),
            None => Ok(Catalog::standard()),
        }
    }
}
