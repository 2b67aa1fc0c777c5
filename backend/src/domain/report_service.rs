//! Monthly attendance aggregation.
//!
//! `build_report` is a pure, deterministic function of the dataset and its
//! arguments. `ReportService` wraps it with loading and class lookup.

use chrono::Month;
use log::info;
use shared::{Dataset, MonthlyReport, ReportPeriod, ReportRow};
use std::sync::Arc;

use super::commands::reports::MonthlyReportQuery;
use super::dataset_store::DatasetStore;
use super::error::{AttendanceError, Result};
use crate::storage::DatasetStorage;

/// Rounded percentage of `present` over `total`, half rounding up.
/// Returns 0 when no days were recorded.
pub fn attendance_percent(present: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    // floor(100 * present / total + 0.5) in exact integer arithmetic
    let present = u64::from(present);
    let total = u64::from(total);
    ((200 * present + total) / (2 * total)) as u32
}

/// English name of a 1-based month number
pub fn month_name(month: u32) -> Result<String> {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name().to_string())
        .ok_or_else(|| {
            AttendanceError::invalid(format!("Month must be between 1 and 12, got {}", month))
        })
}

/// Per-student presence counts for a class over one calendar month.
///
/// Rows follow the class's stored student order. `total` is the number of
/// attendance records for the class that month and is the same on every row.
pub fn build_report(dataset: &Dataset, class_id: &str, year: i32, month: u32) -> Vec<ReportRow> {
    let prefix = ReportPeriod::new(year, month).date_prefix();

    let records: Vec<_> = dataset
        .attendance
        .iter()
        .filter(|a| a.class_id == class_id && a.date.starts_with(&prefix))
        .collect();
    let total = records.len() as u32;

    dataset
        .students_in_class(class_id)
        .map(|student| {
            let present = records.iter().filter(|a| a.is_present(&student.id)).count() as u32;
            ReportRow {
                student_id: student.id.clone(),
                name: student.name.clone(),
                present,
                total,
                percent: attendance_percent(present, total),
            }
        })
        .collect()
}

/// Service that produces monthly reports from persisted state
pub struct ReportService<S: DatasetStorage> {
    store: DatasetStore<S>,
}

impl<S: DatasetStorage> Clone for ReportService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: DatasetStorage> ReportService<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            store: DatasetStore::new(storage),
        }
    }

    /// Build the monthly report for a class; defaults to the current month
    pub async fn monthly_report(&self, query: MonthlyReportQuery) -> Result<MonthlyReport> {
        let period = query.period.unwrap_or_else(ReportPeriod::current);
        let month_name = month_name(period.month)?;
        info!("Building report for class {} for {} {}", query.class_id, month_name, period.year);

        let dataset = self.store.load().await?;
        let class = dataset
            .find_class(&query.class_id)
            .ok_or_else(|| AttendanceError::class_not_found(&query.class_id))?;

        let rows = build_report(&dataset, &class.id, period.year, period.month);
        info!("Report for class {} has {} rows", class.id, rows.len());

        Ok(MonthlyReport {
            class_id: class.id.clone(),
            class_name: class.name.clone(),
            period,
            month_name,
            rows,
        })
    }
}
