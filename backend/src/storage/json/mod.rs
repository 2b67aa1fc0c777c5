//! # JSON Storage Module
//!
//! File-based storage that keeps the entire dataset in one JSON document.

pub mod connection;
pub mod dataset_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::JsonConnection;
pub use dataset_repository::DatasetRepository;
