//! # Domain Module
//!
//! Contains all business logic for the attendance tracker.
//!
//! ## Module Organization
//!
//! - **roster / attendance**: pure transformations over a `Dataset` value
//! - **invariants**: referential-integrity checks run before every save
//! - **dataset_store**: the load → transform → check → save unit of work
//! - **roster_service / attendance_service**: class, student and attendance operations
//! - **report_service**: monthly per-student aggregation
//! - **export_service**: CSV rendering and file delivery
//!
//! ## Business Rules
//!
//! - Every student belongs to an existing class
//! - Deleting a student purges its key from every attendance record
//! - At most one attendance record per class per calendar date; marking again replaces it
//! - Ids are generated once and never reused or changed
//! - Classes cannot be deleted

pub mod attendance;
pub mod attendance_service;
pub mod commands;
pub mod dataset_store;
pub mod error;
pub mod export_service;
pub mod invariants;
pub mod report_service;
pub mod roster;
pub mod roster_service;

pub use attendance_service::AttendanceService;
pub use dataset_store::DatasetStore;
pub use error::{AttendanceError, Result};
pub use export_service::{ExportService, ShareTarget};
pub use report_service::ReportService;
pub use roster_service::RosterService;
