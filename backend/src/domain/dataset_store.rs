use log::{error, warn};
use shared::Dataset;
use std::sync::Arc;

use super::error::{AttendanceError, Result};
use super::invariants;
use crate::storage::DatasetStorage;

/// Runs domain operations against persisted state.
///
/// Every mutation loads the current dataset, applies a pure transformation,
/// checks invariants and saves the result. Failure at any step leaves the
/// persisted dataset as it was.
pub struct DatasetStore<S: DatasetStorage> {
    storage: Arc<S>,
}

impl<S: DatasetStorage> Clone for DatasetStore<S> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
        }
    }
}

impl<S: DatasetStorage> DatasetStore<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Load the current dataset, reporting (not rejecting) inherited violations
    pub async fn load(&self) -> Result<Dataset> {
        let dataset = self.storage.load().await.map_err(|e| {
            error!("Failed to load dataset: {:#}", e);
            AttendanceError::store(e)
        })?;

        for violation in invariants::find_violations(&dataset) {
            warn!("Loaded dataset violates an invariant: {}", violation);
        }
        Ok(dataset)
    }

    /// Load, transform and save as one all-or-nothing unit
    pub async fn apply<T, F>(&self, transform: F) -> Result<T>
    where
        F: FnOnce(&Dataset) -> Result<(Dataset, T)>,
    {
        let current = self.load().await?;
        let (next, output) = transform(&current)?;
        invariants::ensure_no_new_violations(&current, &next)?;

        self.storage.save(&next).await.map_err(|e| {
            error!("Failed to save dataset: {:#}", e);
            AttendanceError::store(e)
        })?;
        Ok(output)
    }
}
