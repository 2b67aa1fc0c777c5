//! # REST API for Student Management

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::info;
use shared::{DeleteStudentResponse, StudentResponse, UpdateStudentRequest};

use super::error_response;
use super::mappers::roster_mapper::RosterMapper;
use crate::AppState;

/// Get a student by ID
pub async fn get_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/students/{}", student_id);

    match state.roster_service.get_student(&student_id).await {
        Ok(student) => (StatusCode::OK, Json(student)).into_response(),
        Err(e) => error_response("get student", e),
    }
}

/// Rename a student or change their roll number
pub async fn update_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    Json(request): Json<UpdateStudentRequest>,
) -> impl IntoResponse {
    info!("PUT /api/students/{} - request: {:?}", student_id, request);

    let command = RosterMapper::to_update_student_command(student_id, request);
    match state.roster_service.update_student(command).await {
        Ok(student) => {
            let response = StudentResponse {
                success_message: "Student updated".to_string(),
                student,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("update student", e),
    }
}

/// Delete a student and purge their attendance marks
pub async fn delete_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/students/{}", student_id);

    match state.roster_service.delete_student(&student_id).await {
        Ok(result) => {
            let response = DeleteStudentResponse {
                deleted_student_id: result.deleted_student.id,
                purged_record_count: result.purged_record_count,
                success_message: format!("Student '{}' deleted", result.deleted_student.name),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("delete student", e),
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/students/:student_id",
        get(get_student).put(update_student).delete(delete_student),
    )
}
