//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types.

pub mod classes {
    /// Input for creating a new class.
    #[derive(Debug, Clone)]
    pub struct CreateClassCommand {
        pub name: String,
        pub section: Option<String>,
    }

    /// Input for replacing a class's non-id fields.
    #[derive(Debug, Clone)]
    pub struct UpdateClassCommand {
        pub class_id: String,
        pub name: String,
        pub section: Option<String>,
    }
}

pub mod students {
    use shared::Student;

    /// Input for enrolling a new student in a class.
    #[derive(Debug, Clone)]
    pub struct CreateStudentCommand {
        pub class_id: String,
        pub name: String,
        pub roll_no: Option<String>,
    }

    /// Input for replacing a student's non-id fields.
    #[derive(Debug, Clone)]
    pub struct UpdateStudentCommand {
        pub student_id: String,
        pub name: String,
        pub roll_no: Option<String>,
    }

    /// Result of deleting a student.
    #[derive(Debug, Clone)]
    pub struct DeleteStudentResult {
        pub deleted_student: Student,
        /// How many attendance records had the student's key removed
        pub purged_record_count: usize,
    }
}

pub mod attendance {
    use std::collections::{BTreeMap, BTreeSet};

    /// Mark the given students present for a class on a date.
    #[derive(Debug, Clone)]
    pub struct MarkAttendanceCommand {
        pub class_id: String,
        pub date: String,
        pub present_student_ids: BTreeSet<String>,
    }

    /// Record explicit present (`true`) / absent (`false`) marks for a class on a date.
    #[derive(Debug, Clone)]
    pub struct RecordAttendanceCommand {
        pub class_id: String,
        pub date: String,
        pub marks: BTreeMap<String, bool>,
    }

    impl From<MarkAttendanceCommand> for RecordAttendanceCommand {
        fn from(command: MarkAttendanceCommand) -> Self {
            RecordAttendanceCommand {
                class_id: command.class_id,
                date: command.date,
                marks: command
                    .present_student_ids
                    .into_iter()
                    .map(|id| (id, true))
                    .collect(),
            }
        }
    }
}

pub mod reports {
    use shared::ReportPeriod;
    use std::path::PathBuf;

    /// Query for a class's monthly report. `None` means the current month.
    #[derive(Debug, Clone)]
    pub struct MonthlyReportQuery {
        pub class_id: String,
        pub period: Option<ReportPeriod>,
    }

    /// Command for exporting a monthly report as a CSV file.
    #[derive(Debug, Clone)]
    pub struct ExportReportCommand {
        pub class_id: String,
        pub period: Option<ReportPeriod>,
        /// Directory override; falls back to the configured export directory
        pub custom_directory: Option<PathBuf>,
    }

    /// How the exported file reached the user.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ExportOutcome {
        /// Written to disk and handed to the share target
        Shared { path: PathBuf },
        /// Written to disk only; the caller should report the location
        Saved { path: PathBuf },
    }

    impl ExportOutcome {
        pub fn path(&self) -> &PathBuf {
            match self {
                ExportOutcome::Shared { path } | ExportOutcome::Saved { path } => path,
            }
        }
    }

    /// Result of exporting a report.
    #[derive(Debug, Clone)]
    pub struct ExportResult {
        pub file_name: String,
        pub outcome: ExportOutcome,
        pub row_count: usize,
    }
}
