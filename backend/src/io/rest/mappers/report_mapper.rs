//! Mappers between report/export DTOs and domain types.

use shared::{ExportRequest, ExportResponse, ReportPeriod, ReportQuery};
use std::path::PathBuf;

use crate::domain::commands::reports::{ExportOutcome, ExportReportCommand, ExportResult};

pub struct ReportMapper;

impl ReportMapper {
    /// Missing year or month falls back to the current one; both missing means "current month"
    pub fn to_period(year: Option<i32>, month: Option<u32>) -> Option<ReportPeriod> {
        match (year, month) {
            (None, None) => None,
            (year, month) => {
                let now = ReportPeriod::current();
                Some(ReportPeriod::new(year.unwrap_or(now.year), month.unwrap_or(now.month)))
            }
        }
    }

    pub fn query_to_period(query: &ReportQuery) -> Option<ReportPeriod> {
        Self::to_period(query.year, query.month)
    }

    pub fn to_export_command(class_id: String, dto: ExportRequest) -> ExportReportCommand {
        ExportReportCommand {
            class_id,
            period: Self::to_period(dto.year, dto.month),
            custom_directory: dto
                .custom_path
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn to_export_response(result: ExportResult) -> ExportResponse {
        let file_path = result.outcome.path().to_string_lossy().to_string();
        let (shared, message) = match &result.outcome {
            ExportOutcome::Shared { .. } => (true, "CSV shared successfully".to_string()),
            ExportOutcome::Saved { .. } => (false, format!("CSV saved to: {}", file_path)),
        };

        ExportResponse {
            success: true,
            message,
            file_path,
            file_name: result.file_name,
            shared,
            row_count: result.row_count,
        }
    }

    /// Informational response for a report with nothing to export
    pub fn to_empty_export_response() -> ExportResponse {
        ExportResponse {
            success: false,
            message: "No attendance data to export for this month.".to_string(),
            file_path: String::new(),
            file_name: String::new(),
            shared: false,
            row_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_defaults() {
        assert_eq!(ReportMapper::to_period(None, None), None);
        assert_eq!(
            ReportMapper::to_period(Some(2024), Some(5)),
            Some(ReportPeriod::new(2024, 5))
        );

        let now = ReportPeriod::current();
        assert_eq!(
            ReportMapper::to_period(Some(2020), None),
            Some(ReportPeriod::new(2020, now.month))
        );
    }

    #[test]
    fn test_saved_export_response_reports_location() {
        let response = ReportMapper::to_export_response(ExportResult {
            file_name: "attendance_A_5_2024.csv".to_string(),
            outcome: ExportOutcome::Saved {
                path: PathBuf::from("/tmp/attendance_A_5_2024.csv"),
            },
            row_count: 3,
        });

        assert!(response.success);
        assert!(!response.shared);
        assert_eq!(response.message, "CSV saved to: /tmp/attendance_A_5_2024.csv");
        assert_eq!(response.row_count, 3);
    }
}
