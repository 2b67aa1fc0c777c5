//! # REST API for Monthly Reports and CSV Export
//!
//! Endpoints for viewing a class's monthly report, downloading it as CSV,
//! and exporting it to a file on the machine running the tracker.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use log::info;
use shared::{ExportRequest, ReportQuery};

use super::error_response;
use super::mappers::report_mapper::ReportMapper;
use crate::domain::commands::reports::MonthlyReportQuery;
use crate::domain::export_service::CSV_MIME_TYPE;
use crate::domain::AttendanceError;
use crate::AppState;

/// Monthly report for a class, current month unless `year`/`month` are given
pub async fn get_monthly_report(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
    Query(query): Query<ReportQuery>,
) -> impl IntoResponse {
    info!("GET /api/classes/{}/report - query: {:?}", class_id, query);

    let report_query = MonthlyReportQuery {
        class_id,
        period: ReportMapper::query_to_period(&query),
    };
    match state.report_service.monthly_report(report_query).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => error_response("build monthly report", e),
    }
}

/// Monthly report rendered as a CSV download
pub async fn download_report_csv(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
    Query(query): Query<ReportQuery>,
) -> impl IntoResponse {
    info!("GET /api/classes/{}/report.csv - query: {:?}", class_id, query);

    let period = ReportMapper::query_to_period(&query);
    match state.export_service.render_csv(&class_id, period).await {
        Ok(rendered) => {
            let disposition =
                HeaderValue::from_str(&format!("attachment; filename=\"{}\"", rendered.file_name))
                    .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, HeaderValue::from_static(CSV_MIME_TYPE)),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                rendered.content,
            )
                .into_response()
        }
        Err(e) => error_response("render report CSV", e),
    }
}

/// Write the monthly report CSV to disk and hand it to the share target
pub async fn export_report(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
    Json(request): Json<ExportRequest>,
) -> impl IntoResponse {
    info!("POST /api/classes/{}/export - request: {:?}", class_id, request);

    let command = ReportMapper::to_export_command(class_id, request);
    match state.export_service.export_report(command).await {
        Ok(result) => {
            (StatusCode::OK, Json(ReportMapper::to_export_response(result))).into_response()
        }
        Err(AttendanceError::EmptyReport) => {
            info!("Nothing to export for the requested month");
            (StatusCode::OK, Json(ReportMapper::to_empty_export_response())).into_response()
        }
        Err(e) => error_response("export report", e),
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/classes/:class_id/report", get(get_monthly_report))
        .route("/classes/:class_id/report.csv", get(download_report_csv))
        .route("/classes/:class_id/export", post(export_report))
}
