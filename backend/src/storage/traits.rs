//! # Storage Traits
//!
//! This module defines the storage abstraction that allows different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use async_trait::async_trait;
use shared::Dataset;

/// Trait defining the whole-dataset persistence contract
///
/// The dataset is the unit of persistence: there are no partial or merge
/// writes. Implementations must make `save` atomic from the caller's
/// perspective so that `load` never observes a truncated blob.
///
/// There is no writer coordination. Two callers that each `load`, mutate and
/// `save` without awaiting one another get last-writer-wins.
#[async_trait]
pub trait DatasetStorage: Send + Sync {
    /// Load the entire dataset
    /// Returns an empty dataset when nothing has been persisted yet
    async fn load(&self) -> Result<Dataset>;

    /// Replace the persisted dataset with `dataset`
    async fn save(&self, dataset: &Dataset) -> Result<()>;
}
