//! # REST API for Class Management
//!
//! Endpoints for creating, renaming, and listing classes, plus the student
//! roster nested under each class.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::info;
use shared::{
    ClassListResponse, ClassResponse, CreateClassRequest, CreateStudentRequest, StudentListResponse,
    StudentResponse, UpdateClassRequest,
};

use super::error_response;
use super::mappers::roster_mapper::RosterMapper;
use crate::AppState;

/// Create a new class
pub async fn create_class(
    State(state): State<AppState>,
    Json(request): Json<CreateClassRequest>,
) -> impl IntoResponse {
    info!("POST /api/classes - request: {:?}", request);

    let command = RosterMapper::to_create_class_command(request);
    match state.roster_service.add_class(command).await {
        Ok(class) => {
            let response = ClassResponse {
                success_message: format!("Class '{}' created", class.name),
                class,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => error_response("create class", e),
    }
}

/// List all classes
pub async fn list_classes(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/classes");

    match state.roster_service.list_classes().await {
        Ok(classes) => (StatusCode::OK, Json(ClassListResponse { classes })).into_response(),
        Err(e) => error_response("list classes", e),
    }
}

/// Get a class by ID
pub async fn get_class(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/classes/{}", class_id);

    match state.roster_service.get_class(&class_id).await {
        Ok(class) => (StatusCode::OK, Json(class)).into_response(),
        Err(e) => error_response("get class", e),
    }
}

/// Rename a class or change its section
pub async fn update_class(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
    Json(request): Json<UpdateClassRequest>,
) -> impl IntoResponse {
    info!("PUT /api/classes/{} - request: {:?}", class_id, request);

    let command = RosterMapper::to_update_class_command(class_id, request);
    match state.roster_service.update_class(command).await {
        Ok(class) => {
            let response = ClassResponse {
                success_message: "Class updated".to_string(),
                class,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("update class", e),
    }
}

/// List the students of a class in insertion order
pub async fn list_class_students(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/classes/{}/students", class_id);

    match state.roster_service.list_students(&class_id).await {
        Ok(students) => (StatusCode::OK, Json(StudentListResponse { students })).into_response(),
        Err(e) => error_response("list students", e),
    }
}

/// Add a student to a class
pub async fn create_class_student(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
    Json(request): Json<CreateStudentRequest>,
) -> impl IntoResponse {
    info!("POST /api/classes/{}/students - request: {:?}", class_id, request);

    let command = RosterMapper::to_create_student_command(class_id, request);
    match state.roster_service.add_student(command).await {
        Ok(student) => {
            let response = StudentResponse {
                success_message: format!("Student '{}' added", student.name),
                student,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => error_response("add student", e),
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/classes", get(list_classes).post(create_class))
        .route("/classes/:class_id", get(get_class).put(update_class))
        .route(
            "/classes/:class_id/students",
            get(list_class_students).post(create_class_student),
        )
}
