//! # JSON Dataset Repository
//!
//! Persists the whole dataset as a single JSON document in the data directory.
//!
//! ## File Structure
//!
//! ```text
//! data/
//! ├── tracker_config.yaml
//! └── attendance_data.json    ← This module manages this file
//! ```
//!
//! ## Features
//!
//! - Missing file loads as an empty dataset
//! - Atomic file writes with temp files (write, fsync, rename)

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use shared::Dataset;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::connection::JsonConnection;
use crate::storage::traits::DatasetStorage;

/// File-backed dataset repository
#[derive(Debug, Clone)]
pub struct DatasetRepository {
    connection: JsonConnection,
}

impl DatasetRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    pub fn connection(&self) -> &JsonConnection {
        &self.connection
    }
}

#[async_trait]
impl DatasetStorage for DatasetRepository {
    async fn load(&self) -> Result<Dataset> {
        let path = self.connection.data_file_path();

        let content = match fs::read(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No dataset at {:?}, starting empty", path);
                return Ok(Dataset::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read dataset from {}", path.display()));
            }
        };

        let dataset: Dataset = serde_json::from_slice(&content)
            .with_context(|| format!("Failed to parse dataset at {}", path.display()))?;

        debug!(
            "Loaded dataset from {:?} ({} bytes, {} classes, {} students, {} attendance records)",
            path,
            content.len(),
            dataset.classes.len(),
            dataset.students.len(),
            dataset.attendance.len()
        );
        Ok(dataset)
    }

    async fn save(&self, dataset: &Dataset) -> Result<()> {
        let path = self.connection.data_file_path();
        let base_directory = self.connection.base_directory();

        fs::create_dir_all(base_directory).await.with_context(|| {
            format!("Failed to create data directory {}", base_directory.display())
        })?;

        let content = serde_json::to_vec_pretty(dataset).context("Failed to serialize dataset")?;

        // Atomic write: stage in a per-save temp file, then rename over the blob
        let temp_path = self.connection.temp_file_path();
        if let Err(e) = write_and_rename(&temp_path, &path, &content).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }

        info!("Saved dataset to {:?} ({} bytes)", path, content.len());
        Ok(())
    }
}

async fn write_and_rename(temp_path: &Path, path: &Path, content: &[u8]) -> Result<()> {
    {
        let mut file = fs::File::create(temp_path)
            .await
            .with_context(|| format!("Failed to create {}", temp_path.display()))?;
        file.write_all(content)
            .await
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        file.sync_all()
            .await
            .with_context(|| format!("Failed to flush {}", temp_path.display()))?;
    }
    fs::rename(temp_path, path)
        .await
        .with_context(|| format!("Failed to move dataset into place at {}", path.display()))
}
