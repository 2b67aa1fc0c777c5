//! # REST API Interface Layer
//!
//! HTTP endpoints a UI calls into. This layer handles:
//! - JSON request/response serialization
//! - Mapping shared DTOs to domain commands
//! - Translating domain errors into HTTP status codes
//! - Request logging
//!
//! Every domain failure becomes a status code plus a plain-text message the UI
//! can show as a dismissible notice. None of them stop the server.

pub mod attendance_apis;
pub mod class_apis;
pub mod mappers;
pub mod report_apis;
pub mod student_apis;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::{error, warn};

use crate::domain::AttendanceError;

/// HTTP status for a domain error
pub fn status_for(err: &AttendanceError) -> StatusCode {
    match err {
        AttendanceError::NotFound(_) => StatusCode::NOT_FOUND,
        AttendanceError::InvalidOperation(_) => StatusCode::BAD_REQUEST,
        AttendanceError::EmptyReport => StatusCode::NO_CONTENT,
        AttendanceError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Convert a domain error into a response, logging it with the failed action
pub fn error_response(action: &str, err: AttendanceError) -> Response {
    let status = status_for(&err);
    match err {
        AttendanceError::StoreUnavailable(_) => error!("Failed to {}: {}", action, err),
        _ => warn!("Failed to {}: {}", action, err),
    }

    if status == StatusCode::NO_CONTENT {
        return status.into_response();
    }
    (status, err.to_string()).into_response()
}
