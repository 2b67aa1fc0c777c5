use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A roster/section of students.
/// ID format: "class::<uuid>"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassGroup {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

/// A student enrolled in exactly one class.
/// ID format: "student::<uuid>"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    /// ID of the class this student belongs to
    pub class_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll_no: Option<String>,
}

/// Attendance taken for one class on one calendar date.
///
/// A student id missing from `records` means "not recorded" for that date,
/// which is distinct from an explicit `false` (marked absent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub class_id: String,
    /// Calendar date in YYYY-MM-DD form
    pub date: String,
    #[serde(default)]
    pub records: BTreeMap<String, bool>,
}

impl AttendanceRecord {
    /// Whether the student has a truthy entry on this record
    pub fn is_present(&self, student_id: &str) -> bool {
        self.records.get(student_id).copied().unwrap_or(false)
    }
}

/// The aggregate root and the unit of persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub classes: Vec<ClassGroup>,
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
}

impl Dataset {
    pub fn find_class(&self, class_id: &str) -> Option<&ClassGroup> {
        self.classes.iter().find(|c| c.id == class_id)
    }

    pub fn find_student(&self, student_id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == student_id)
    }

    /// Students of a class in stored insertion order
    pub fn students_in_class<'a>(
        &'a self,
        class_id: &'a str,
    ) -> impl Iterator<Item = &'a Student> + 'a {
        self.students.iter().filter(move |s| s.class_id == class_id)
    }

    pub fn find_attendance(&self, class_id: &str, date: &str) -> Option<&AttendanceRecord> {
        self.attendance
            .iter()
            .find(|a| a.class_id == class_id && a.date == date)
    }
}

/// Calendar month a report is computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub year: i32,
    /// 1-based month number
    pub month: u32,
}

impl ReportPeriod {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The current local calendar month
    pub fn current() -> Self {
        let now = chrono::Local::now();
        Self {
            year: now.year(),
            month: now.month(),
        }
    }

    /// Zero-padded "YYYY-MM" prefix matched against attendance dates
    pub fn date_prefix(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

impl Default for ReportPeriod {
    fn default() -> Self {
        Self::current()
    }
}

/// One student's presence summary for a month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub student_id: String,
    pub name: String,
    pub present: u32,
    /// Number of days attendance was taken for the class in the month
    pub total: u32,
    /// Rounded percentage, 0 when total is 0
    pub percent: u32,
}

/// Monthly report for one class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub class_id: String,
    pub class_name: String,
    pub period: ReportPeriod,
    /// English month name, e.g. "May"
    pub month_name: String,
    pub rows: Vec<ReportRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassRequest {
    pub name: String,
    #[serde(default)]
    pub section: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClassRequest {
    pub name: String,
    #[serde(default)]
    pub section: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassResponse {
    pub class: ClassGroup,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassListResponse {
    pub classes: Vec<ClassGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    pub name: String,
    #[serde(default)]
    pub roll_no: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    pub name: String,
    #[serde(default)]
    pub roll_no: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub student: Student,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentListResponse {
    pub students: Vec<Student>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteStudentResponse {
    pub deleted_student_id: String,
    /// Number of attendance records the student's key was purged from
    pub purged_record_count: usize,
    pub success_message: String,
}

/// Request to mark attendance for a class on a date.
///
/// Ids in `absent_student_ids` are recorded as explicit absences; students in
/// neither list stay "not recorded".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceRequest {
    pub present_student_ids: Vec<String>,
    #[serde(default)]
    pub absent_student_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceResponse {
    pub record: AttendanceRecord,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceListResponse {
    pub records: Vec<AttendanceRecord>,
}

/// Optional month override for report endpoints; missing parts default to now
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub year: Option<i32>,
    pub month: Option<u32>,
    /// Directory to write the CSV into instead of the configured default
    pub custom_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub success: bool,
    pub message: String,
    pub file_path: String,
    pub file_name: String,
    /// Whether the file was handed to a share target rather than just saved
    pub shared: bool,
    pub row_count: usize,
}
