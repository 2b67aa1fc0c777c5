//! # Attendance Tracker Backend
//!
//! Contains all non-UI logic for the attendance tracker: class rosters,
//! daily attendance, monthly reports and CSV export.
//!
//! This crate is the orchestration layer that brings together:
//! - **Domain**: validation, dataset invariants, report arithmetic
//! - **Storage**: the single JSON dataset blob
//! - **IO**: the REST API a UI calls into
//!
//! ## Architecture
//!
//! ```text
//! UI Layer (any HTTP client)
//!     ↓
//! IO Layer (REST API, handlers, mappers)
//!     ↓
//! Domain Layer (services, pure dataset transformations)
//!     ↓
//! Storage Layer (JSON blob, atomic saves)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod logging;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use log::info;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::TrackerConfig;
use crate::domain::{AttendanceService, ExportService, ReportService, RosterService};
use crate::storage::{DatasetRepository, JsonConnection};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub roster_service: RosterService<DatasetRepository>,
    pub attendance_service: AttendanceService<DatasetRepository>,
    pub report_service: ReportService<DatasetRepository>,
    pub export_service: ExportService<DatasetRepository>,
}

impl AppState {
    /// Wire every service to one shared repository
    pub fn new(repository: Arc<DatasetRepository>, export_directory: Option<PathBuf>) -> Self {
        let report_service = ReportService::new(repository.clone());
        Self {
            roster_service: RosterService::new(repository.clone()),
            attendance_service: AttendanceService::new(repository),
            export_service: ExportService::new(report_service.clone(), export_directory),
            report_service,
        }
    }
}

/// Initialize the backend with all required services
pub fn initialize_backend(config: &TrackerConfig, data_dir: &Path) -> Result<AppState> {
    info!("Setting up storage in {}", data_dir.display());
    let connection =
        JsonConnection::new(data_dir)?.with_data_file_name(config.data_file_name.clone());
    let repository = Arc::new(DatasetRepository::new(connection));

    info!("Setting up application state");
    Ok(AppState::new(repository, config.export_directory.clone()))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow a local frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(HeaderValue::from_static("http://localhost:8080"))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .merge(io::rest::class_apis::router())
        .merge(io::rest::student_apis::router())
        .merge(io::rest::attendance_apis::router())
        .merge(io::rest::report_apis::router());

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
