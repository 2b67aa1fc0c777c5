use anyhow::{Context, Result};
use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "ATTENDANCE_TRACKER_DATA_DIR";

/// Name of the redirect file honored inside the default data directory
pub const REDIRECT_FILE_NAME: &str = ".attendance_redirect";

pub const DEFAULT_DATA_FILE_NAME: &str = "attendance_data.json";

/// JsonConnection manages the data directory and the location of the dataset blob
#[derive(Debug, Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
    data_file_name: String,
}

impl JsonConnection {
    /// Create a new JSON connection rooted at a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).with_context(|| {
                format!("Failed to create data directory {}", base_path.display())
            })?;
        }

        Ok(Self {
            base_directory: base_path,
            data_file_name: DEFAULT_DATA_FILE_NAME.to_string(),
        })
    }

    /// Use a different file name for the dataset blob
    pub fn with_data_file_name(mut self, data_file_name: impl Into<String>) -> Self {
        self.data_file_name = data_file_name.into();
        self
    }

    /// Create a new JSON connection in the resolved default data directory
    pub fn new_default() -> Result<Self> {
        Self::new(Self::resolve_data_directory()?)
    }

    /// Resolve where data lives.
    ///
    /// `ATTENDANCE_TRACKER_DATA_DIR` wins; otherwise ~/Documents/Attendance Tracker,
    /// unless a redirect file there points at an existing directory.
    pub fn resolve_data_directory() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                info!("Using data directory from {}: {}", DATA_DIR_ENV, dir);
                return Ok(PathBuf::from(dir.trim()));
            }
        }

        let documents_dir = dirs::document_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
        let default_data_dir = documents_dir.join("Attendance Tracker");

        Ok(Self::follow_redirect(default_data_dir))
    }

    /// Follow a redirect file inside `default_dir` if it names an existing directory
    pub fn follow_redirect(default_dir: PathBuf) -> PathBuf {
        let redirect_file = default_dir.join(REDIRECT_FILE_NAME);
        if !redirect_file.exists() {
            info!(
                "No redirect file found, using default data directory: {}",
                default_dir.display()
            );
            return default_dir;
        }

        match fs::read_to_string(&redirect_file) {
            Ok(redirected_path) => {
                let redirected_path = redirected_path.trim();
                let path = PathBuf::from(redirected_path);
                if path.exists() {
                    info!("Found redirect file, using data directory: {}", path.display());
                    path
                } else {
                    warn!(
                        "Redirect file points to non-existent directory: {}. Using default.",
                        redirected_path
                    );
                    default_dir
                }
            }
            Err(e) => {
                error!("Failed to read redirect file: {}. Using default directory.", e);
                default_dir
            }
        }
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the dataset blob
    pub fn data_file_path(&self) -> PathBuf {
        self.base_directory.join(&self.data_file_name)
    }

    /// Fresh staging path next to the blob; unique per call so overlapping saves never share one
    pub fn temp_file_path(&self) -> PathBuf {
        self.base_directory
            .join(format!("{}.{}.tmp", self.data_file_name, Uuid::new_v4().simple()))
    }
}
