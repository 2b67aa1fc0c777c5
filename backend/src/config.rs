//! Tracker configuration stored as YAML next to the dataset.
//!
//! A missing file is created with defaults on first start. Fields missing from
//! an older file fall back to their defaults.

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::json::connection::DEFAULT_DATA_FILE_NAME;

pub const CONFIG_FILE_NAME: &str = "tracker_config.yaml";

pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Address the REST server binds to
    pub listen_addr: String,
    /// Where exported CSV files go when a request names no directory
    pub export_directory: Option<PathBuf>,
    /// Fallback log filter when `RUST_LOG` is unset
    pub log_filter: String,
    pub data_file_name: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:3000".to_string(),
            export_directory: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            data_file_name: DEFAULT_DATA_FILE_NAME.to_string(),
        }
    }
}

impl TrackerConfig {
    pub fn config_path(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE_NAME)
    }

    /// Load the config from `data_dir`, writing defaults if none exists yet
    pub fn load_or_create(data_dir: &Path) -> Result<Self> {
        let config_path = Self::config_path(data_dir);

        if config_path.exists() {
            let yaml_content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
            let config: TrackerConfig = serde_yaml::from_str(&yaml_content)
                .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;
            return Ok(config);
        }

        info!("No config found, writing defaults to {}", config_path.display());
        let config = TrackerConfig::default();
        config.save(data_dir)?;
        Ok(config)
    }

    /// Write the config atomically through a temp file
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

        let config_path = Self::config_path(data_dir);
        let yaml_content = serde_yaml::to_string(self)?;

        let temp_path = config_path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &config_path)?;
        Ok(())
    }
}
