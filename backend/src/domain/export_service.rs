//! Export service domain logic for the attendance tracker.
//!
//! Renders monthly reports as CSV and delivers the file: it is written into an
//! export directory and then offered to a share target when one is attached.
//! The UI should only handle presentation concerns.
//!
//! Fields are written without quoting or escaping. A name containing a comma
//! or newline produces a malformed line; this is a known limitation.

use async_trait::async_trait;
use log::{error, info, warn};
use shared::{ReportPeriod, ReportRow};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use uuid::Uuid;

use super::commands::reports::{
    ExportOutcome, ExportReportCommand, ExportResult, MonthlyReportQuery,
};
use super::error::{AttendanceError, Result};
use super::report_service::ReportService;
use crate::storage::DatasetStorage;

pub const CSV_MIME_TYPE: &str = "text/csv";
pub const CSV_HEADER: [&str; 4] = ["Name", "Present", "Total", "Percent"];

/// Render report rows as CSV text.
///
/// The header is `Name,Present,Total,Percent`; lines are joined with `\n` and
/// there is no trailing newline.
pub fn to_csv(rows: &[ReportRow]) -> Result<String> {
    if rows.is_empty() {
        return Err(AttendanceError::EmptyReport);
    }

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let render_err =
        |e: csv::Error| AttendanceError::invalid(format!("Failed to render CSV: {}", e));

    writer.write_record(CSV_HEADER).map_err(render_err)?;
    for row in rows {
        let present = row.present.to_string();
        let total = row.total.to_string();
        let percent = row.percent.to_string();
        writer
            .write_record([row.name.as_str(), present.as_str(), total.as_str(), percent.as_str()])
            .map_err(render_err)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AttendanceError::invalid(format!("Failed to render CSV: {}", e)))?;
    let mut csv_content = String::from_utf8(bytes)
        .map_err(|e| AttendanceError::invalid(format!("Failed to render CSV: {}", e)))?;

    if csv_content.ends_with('\n') {
        csv_content.pop();
    }
    Ok(csv_content)
}

/// `attendance_<label>_<month>_<year>.csv` with each whitespace run replaced by `_`.
///
/// Path separators and other characters that are not allowed in file names
/// also become `_`, so the result is always a single path component.
pub fn export_file_name(label: &str, period: ReportPeriod) -> String {
    let raw = format!("attendance_{}_{}_{}.csv", label, period.month, period.year);

    let mut file_name = String::with_capacity(raw.len());
    let mut in_whitespace = false;
    for c in raw.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                file_name.push('_');
            }
            in_whitespace = true;
        } else {
            file_name.push(if is_file_name_safe(c) { c } else { '_' });
            in_whitespace = false;
        }
    }
    file_name
}

fn is_file_name_safe(c: char) -> bool {
    !c.is_control() && !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
}

/// A rendered export, not yet written anywhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCsv {
    pub file_name: String,
    pub content: String,
    pub row_count: usize,
}

/// External collaborator that offers a written file to the user (a share sheet)
#[async_trait]
pub trait ShareTarget: Send + Sync {
    /// Whether sharing is possible right now
    fn is_available(&self) -> bool;

    async fn share(&self, path: &Path, mime_type: &str, dialog_title: &str) -> anyhow::Result<()>;
}

/// Export service that handles all export-related business logic
pub struct ExportService<S: DatasetStorage> {
    report_service: ReportService<S>,
    export_directory: Option<PathBuf>,
    share_target: Option<Arc<dyn ShareTarget>>,
}

impl<S: DatasetStorage> Clone for ExportService<S> {
    fn clone(&self) -> Self {
        Self {
            report_service: self.report_service.clone(),
            export_directory: self.export_directory.clone(),
            share_target: self.share_target.clone(),
        }
    }
}

impl<S: DatasetStorage> ExportService<S> {
    pub fn new(report_service: ReportService<S>, export_directory: Option<PathBuf>) -> Self {
        Self {
            report_service,
            export_directory,
            share_target: None,
        }
    }

    /// Attach a share target; without one, exports are only saved
    pub fn with_share_target(mut self, share_target: Arc<dyn ShareTarget>) -> Self {
        self.share_target = Some(share_target);
        self
    }

    /// Build the report for a class and render it as CSV
    pub async fn render_csv(
        &self,
        class_id: &str,
        period: Option<ReportPeriod>,
    ) -> Result<RenderedCsv> {
        let report = self
            .report_service
            .monthly_report(MonthlyReportQuery {
                class_id: class_id.to_string(),
                period,
            })
            .await?;

        let csv_content = to_csv(&report.rows)?;
        let label = if report.class_name.trim().is_empty() {
            report.class_id.as_str()
        } else {
            report.class_name.as_str()
        };
        let file_name = export_file_name(label, report.period);

        Ok(RenderedCsv {
            file_name,
            content: csv_content,
            row_count: report.rows.len(),
        })
    }

    /// Export a monthly report to disk and offer it to the share target
    pub async fn export_report(&self, command: ExportReportCommand) -> Result<ExportResult> {
        info!("📄 EXPORT: Exporting report for class {}", command.class_id);

        let RenderedCsv {
            file_name,
            content,
            row_count,
        } = self.render_csv(&command.class_id, command.period).await?;

        let export_dir = self.resolve_export_directory(command.custom_directory);
        let file_path = export_dir.join(&file_name);
        write_export_file(&file_path, content.as_bytes()).await?;
        info!("✅ EXPORT: Wrote {} rows ({} bytes) to {:?}", row_count, content.len(), file_path);

        let outcome = match &self.share_target {
            Some(target) if target.is_available() => {
                match target.share(&file_path, CSV_MIME_TYPE, "Share attendance CSV").await {
                    Ok(()) => ExportOutcome::Shared { path: file_path },
                    Err(e) => {
                        warn!("Share target failed, reporting saved location instead: {:#}", e);
                        ExportOutcome::Saved { path: file_path }
                    }
                }
            }
            _ => ExportOutcome::Saved { path: file_path },
        };

        Ok(ExportResult {
            file_name,
            outcome,
            row_count,
        })
    }

    /// Custom directory, then the configured one, then Documents, cache, temp
    fn resolve_export_directory(&self, custom: Option<PathBuf>) -> PathBuf {
        if let Some(custom) = custom {
            let cleaned = sanitize_path(&custom.to_string_lossy());
            if !cleaned.is_empty() {
                return PathBuf::from(cleaned);
            }
        }
        if let Some(dir) = &self.export_directory {
            return dir.clone();
        }
        dirs::document_dir()
            .or_else(dirs::cache_dir)
            .unwrap_or_else(std::env::temp_dir)
    }
}

async fn write_export_file(file_path: &Path, content: &[u8]) -> Result<()> {
    let write_err = |what: &str, e: std::io::Error| {
        error!("❌ EXPORT: Failed to {} {:?}: {}", what, file_path, e);
        AttendanceError::StoreUnavailable(format!(
            "Failed to {} {}: {}",
            what,
            file_path.display(),
            e
        ))
    };

    if let Some(parent_dir) = file_path.parent() {
        fs::create_dir_all(parent_dir)
            .await
            .map_err(|e| write_err("create export directory for", e))?;
    }

    let temp_path = file_path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));
    if let Err(e) = fs::write(&temp_path, content).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(write_err("write export file", e));
    }
    if let Err(e) = fs::rename(&temp_path, file_path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(write_err("move export file into place at", e));
    }
    Ok(())
}

/// Basic path sanitization to handle common user input issues
fn sanitize_path(path: &str) -> String {
    let mut cleaned = path.trim().to_string();

    // Remove surrounding quotes (single or double)
    if cleaned.len() >= 2
        && ((cleaned.starts_with('"') && cleaned.ends_with('"'))
            || (cleaned.starts_with('\'') && cleaned.ends_with('\'')))
    {
        cleaned = cleaned[1..cleaned.len() - 1].trim().to_string();
    }

    cleaned = cleaned.replace("\\ ", " ");

    while cleaned.len() > 1 && (cleaned.ends_with('/') || cleaned.ends_with('\\')) {
        cleaned.pop();
    }

    if cleaned == "~" || cleaned.starts_with("~/") || cleaned.starts_with("~\\") {
        if let Some(home) = dirs::home_dir() {
            cleaned = if cleaned == "~" {
                home.to_string_lossy().to_string()
            } else {
                home.join(&cleaned[2..]).to_string_lossy().to_string()
            };
        }
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::classes::CreateClassCommand;
    use crate::domain::commands::students::CreateStudentCommand;
    use crate::domain::RosterService;
    use crate::storage::json::test_utils::TestEnvironment;
    use crate::storage::DatasetRepository;
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn row(name: &str, present: u32, total: u32, percent: u32) -> ReportRow {
        ReportRow {
            student_id: format!("student::{}", name),
            name: name.to_string(),
            present,
            total,
            percent,
        }
    }

    struct RecordingShareTarget {
        available: bool,
        shared: Mutex<Vec<(PathBuf, String)>>,
    }

    #[async_trait]
    impl ShareTarget for RecordingShareTarget {
        fn is_available(&self) -> bool {
            self.available
        }

        async fn share(
            &self,
            path: &Path,
            mime_type: &str,
            _dialog_title: &str,
        ) -> anyhow::Result<()> {
            self.shared
                .lock()
                .unwrap()
                .push((path.to_path_buf(), mime_type.to_string()));
            Ok(())
        }
    }

    async fn seeded_service(
        env: &TestEnvironment,
        export_dir: &Path,
    ) -> anyhow::Result<(ExportService<DatasetRepository>, String)> {
        let roster = RosterService::new(env.repository());
        let class = roster
            .add_class(CreateClassCommand {
                name: "Grade 5  B".to_string(),
                section: None,
            })
            .await?;
        roster
            .add_student(CreateStudentCommand {
                class_id: class.id.clone(),
                name: "Alice".to_string(),
                roll_no: None,
            })
            .await?;

        let reports = ReportService::new(env.repository());
        Ok((ExportService::new(reports, Some(export_dir.to_path_buf())), class.id))
    }

    #[test]
    fn test_to_csv_layout() {
        let csv = to_csv(&[row("Alice", 2, 2, 100), row("Bob", 1, 2, 50)]).unwrap();
        assert_eq!(csv, "Name,Present,Total,Percent\nAlice,2,2,100\nBob,1,2,50");
    }

    #[test]
    fn test_to_csv_does_not_quote_fields() {
        let csv = to_csv(&[row("Doe, Jane", 1, 1, 100)]).unwrap();
        assert_eq!(csv, "Name,Present,Total,Percent\nDoe, Jane,1,1,100");
    }

    #[test]
    fn test_to_csv_rejects_empty_report() {
        assert!(matches!(to_csv(&[]), Err(AttendanceError::EmptyReport)));
    }

    #[test]
    fn test_export_file_name_collapses_whitespace() {
        assert_eq!(
            export_file_name("Grade 5  B", ReportPeriod::new(2024, 5)),
            "attendance_Grade_5_B_5_2024.csv"
        );
        assert_eq!(
            export_file_name("class::abc", ReportPeriod::new(2023, 11)),
            "attendance_class__abc_11_2023.csv"
        );
    }

    #[test]
    fn test_export_file_name_replaces_path_separators() {
        assert_eq!(
            export_file_name("x/../../escaped", ReportPeriod::new(2024, 5)),
            "attendance_x_.._.._escaped_5_2024.csv"
        );
        assert_eq!(
            export_file_name("a\\b|c?", ReportPeriod::new(2024, 5)),
            "attendance_a_b_c__5_2024.csv"
        );
    }

    #[test]
    fn test_sanitize_path() {
        assert_eq!(sanitize_path("  \"/tmp/exports/\" "), "/tmp/exports");
        assert_eq!(sanitize_path("'/tmp/my\\ exports'"), "/tmp/my exports");
        assert_eq!(sanitize_path("/"), "/");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(sanitize_path("~/exports"), home.join("exports").to_string_lossy());
        }
    }

    #[tokio::test]
    async fn test_export_without_share_target_reports_saved_location() -> anyhow::Result<()> {
        let env = TestEnvironment::new().await?;
        let export_dir = TempDir::new()?;
        let (service, class_id) = seeded_service(&env, export_dir.path()).await?;

        let result = service
            .export_report(ExportReportCommand {
                class_id,
                period: Some(ReportPeriod::new(2024, 5)),
                custom_directory: None,
            })
            .await?;

        let expected_path = export_dir.path().join("attendance_Grade_5_B_5_2024.csv");
        assert_eq!(result.outcome, ExportOutcome::Saved { path: expected_path.clone() });
        assert_eq!(result.row_count, 1);
        assert_eq!(
            std::fs::read_to_string(&expected_path)?,
            "Name,Present,Total,Percent\nAlice,0,0,0"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_export_hands_file_to_available_share_target() -> anyhow::Result<()> {
        let env = TestEnvironment::new().await?;
        let export_dir = TempDir::new()?;
        let custom_dir = TempDir::new()?;
        let (service, class_id) = seeded_service(&env, export_dir.path()).await?;
        let target = Arc::new(RecordingShareTarget {
            available: true,
            shared: Mutex::new(Vec::new()),
        });
        let service = service.with_share_target(target.clone());

        let result = service
            .export_report(ExportReportCommand {
                class_id,
                period: Some(ReportPeriod::new(2024, 5)),
                custom_directory: Some(custom_dir.path().to_path_buf()),
            })
            .await?;

        let expected_path = custom_dir.path().join("attendance_Grade_5_B_5_2024.csv");
        assert_eq!(result.outcome, ExportOutcome::Shared { path: expected_path.clone() });
        assert_eq!(
            target.shared.lock().unwrap().clone(),
            vec![(expected_path, CSV_MIME_TYPE.to_string())]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_unavailable_share_target_falls_back_to_saved() -> anyhow::Result<()> {
        let env = TestEnvironment::new().await?;
        let export_dir = TempDir::new()?;
        let (service, class_id) = seeded_service(&env, export_dir.path()).await?;
        let service = service.with_share_target(Arc::new(RecordingShareTarget {
            available: false,
            shared: Mutex::new(Vec::new()),
        }));

        let result = service
            .export_report(ExportReportCommand {
                class_id,
                period: Some(ReportPeriod::new(2024, 5)),
                custom_directory: None,
            })
            .await?;

        assert!(matches!(result.outcome, ExportOutcome::Saved { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_export_of_class_without_students_is_empty_report() -> anyhow::Result<()> {
        let env = TestEnvironment::new().await?;
        let export_dir = TempDir::new()?;
        let roster = RosterService::new(env.repository());
        let class = roster
            .add_class(CreateClassCommand {
                name: "Empty".to_string(),
                section: None,
            })
            .await?;
        let service = ExportService::new(
            ReportService::new(env.repository()),
            Some(export_dir.path().to_path_buf()),
        );

        let err = service
            .export_report(ExportReportCommand {
                class_id: class.id,
                period: None,
                custom_directory: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AttendanceError::EmptyReport));
        assert_eq!(std::fs::read_dir(export_dir.path())?.count(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_class_name_with_separators_stays_in_export_directory() -> anyhow::Result<()> {
        let env = TestEnvironment::new().await?;
        let export_dir = TempDir::new()?;
        let roster = RosterService::new(env.repository());
        let class = roster
            .add_class(CreateClassCommand {
                name: "x/../../escaped".to_string(),
                section: None,
            })
            .await?;
        roster
            .add_student(CreateStudentCommand {
                class_id: class.id.clone(),
                name: "Alice".to_string(),
                roll_no: None,
            })
            .await?;
        let service = ExportService::new(
            ReportService::new(env.repository()),
            Some(export_dir.path().to_path_buf()),
        );

        let result = service
            .export_report(ExportReportCommand {
                class_id: class.id,
                period: Some(ReportPeriod::new(2024, 5)),
                custom_directory: None,
            })
            .await?;

        let path = result.outcome.path();
        assert_eq!(path.parent(), Some(export_dir.path()));
        assert!(path.exists());
        let entries: Vec<_> = std::fs::read_dir(export_dir.path())?
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().to_string()))
            .collect::<std::io::Result<_>>()?;
        assert_eq!(entries, vec!["attendance_x_.._.._escaped_5_2024.csv".to_string()]);
        Ok(())
    }
}
