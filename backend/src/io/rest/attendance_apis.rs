//! # REST API for Attendance
//!
//! Marking a date replaces that date's record for the class. Reading a date
//! that was never marked returns 404 so the UI can start from an empty sheet.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::info;
use shared::{AttendanceListResponse, AttendanceResponse, MarkAttendanceRequest};

use super::error_response;
use super::mappers::attendance_mapper::AttendanceMapper;
use crate::AppState;

/// Mark attendance for a class on a date
pub async fn mark_attendance(
    State(state): State<AppState>,
    Path((class_id, date)): Path<(String, String)>,
    Json(request): Json<MarkAttendanceRequest>,
) -> impl IntoResponse {
    info!("PUT /api/classes/{}/attendance/{} - request: {:?}", class_id, date, request);

    let command = match AttendanceMapper::to_record_command(class_id, date, request) {
        Ok(command) => command,
        Err(e) => return error_response("mark attendance", e),
    };

    match state.attendance_service.record_attendance(command).await {
        Ok(record) => {
            let response = AttendanceResponse {
                success_message: format!("Attendance saved for {}", record.date),
                record,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("mark attendance", e),
    }
}

/// Get the attendance record for a class on a date
pub async fn get_attendance(
    State(state): State<AppState>,
    Path((class_id, date)): Path<(String, String)>,
) -> impl IntoResponse {
    info!("GET /api/classes/{}/attendance/{}", class_id, date);

    match state.attendance_service.get_attendance(&class_id, &date).await {
        Ok(Some(record)) => (StatusCode::OK, Json(record)).into_response(),
        Ok(None) => {
            (StatusCode::NOT_FOUND, "Attendance not recorded for this date").into_response()
        }
        Err(e) => error_response("get attendance", e),
    }
}

/// List every attendance record of a class
pub async fn list_attendance(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/classes/{}/attendance", class_id);

    match state.attendance_service.list_attendance(&class_id).await {
        Ok(records) => (StatusCode::OK, Json(AttendanceListResponse { records })).into_response(),
        Err(e) => error_response("list attendance", e),
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/classes/:class_id/attendance", get(list_attendance))
        .route(
            "/classes/:class_id/attendance/:date",
            get(get_attendance).put(mark_attendance),
        )
}
