//! # Storage Module
//!
//! Handles all data persistence for the attendance tracker.
//!
//! The domain layer depends on the `DatasetStorage` abstraction only, so the
//! JSON blob implementation can be swapped out without touching the domain
//! logic or the IO layer.
//!
//! ## Current Implementation
//!
//! - **Primary Storage**: a single JSON document holding classes, students and
//!   attendance records
//! - **Atomicity**: whole-dataset saves staged in a temp file and renamed into place
//! - **Concurrency**: single active writer; last writer wins

pub mod json;
pub mod traits;

pub use json::{DatasetRepository, JsonConnection};
pub use traits::DatasetStorage;
