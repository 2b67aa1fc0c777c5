//! Pure attendance transformations.

use chrono::NaiveDate;
use shared::{AttendanceRecord, Dataset};

use super::commands::attendance::{MarkAttendanceCommand, RecordAttendanceCommand};
use super::error::{AttendanceError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a strict YYYY-MM-DD calendar date
pub fn parse_attendance_date(date: &str) -> Result<NaiveDate> {
    let invalid_date = || {
        AttendanceError::invalid(format!("Date must be a valid YYYY-MM-DD date, got {:?}", date))
    };
    let parsed = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| invalid_date())?;

    // chrono accepts unpadded fields; the stored form must be canonical
    if parsed.format(DATE_FORMAT).to_string() != date {
        return Err(invalid_date());
    }
    Ok(parsed)
}

/// Upsert the record for `(class_id, date)` with explicit marks.
///
/// Every marked id must be a current student of the class; otherwise nothing
/// is applied.
pub fn record_attendance(
    dataset: &Dataset,
    command: RecordAttendanceCommand,
) -> Result<(Dataset, AttendanceRecord)> {
    if dataset.find_class(&command.class_id).is_none() {
        return Err(AttendanceError::class_not_found(&command.class_id));
    }
    parse_attendance_date(&command.date)?;

    let foreign: Vec<&str> = command
        .marks
        .keys()
        .filter(|id| {
            dataset
                .find_student(id)
                .map_or(true, |s| s.class_id != command.class_id)
        })
        .map(String::as_str)
        .collect();
    if !foreign.is_empty() {
        return Err(AttendanceError::invalid(format!(
            "Students not enrolled in class {}: {}",
            command.class_id,
            foreign.join(", ")
        )));
    }

    let record = AttendanceRecord {
        class_id: command.class_id,
        date: command.date,
        records: command.marks,
    };

    let mut next = dataset.clone();
    match next
        .attendance
        .iter_mut()
        .find(|a| a.class_id == record.class_id && a.date == record.date)
    {
        Some(existing) => existing.records = record.records.clone(),
        None => next.attendance.push(record.clone()),
    }

    Ok((next, record))
}

/// Upsert the record for `(class_id, date)` marking the given students present
pub fn mark_attendance(
    dataset: &Dataset,
    command: MarkAttendanceCommand,
) -> Result<(Dataset, AttendanceRecord)> {
    record_attendance(dataset, command.into())
}

/// Attendance records of a class in stored order
pub fn list_attendance(dataset: &Dataset, class_id: &str) -> Vec<AttendanceRecord> {
    dataset
        .attendance
        .iter()
        .filter(|a| a.class_id == class_id)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{ClassGroup, Student};
    use std::collections::{BTreeMap, BTreeSet};

    fn roster() -> Dataset {
        Dataset {
            classes: vec![
                ClassGroup {
                    id: "c1".to_string(),
                    name: "Grade 5".to_string(),
                    section: None,
                },
                ClassGroup {
                    id: "c2".to_string(),
                    name: "Grade 6".to_string(),
                    section: None,
                },
            ],
            students: vec![
                Student {
                    id: "alice".to_string(),
                    class_id: "c1".to_string(),
                    name: "Alice".to_string(),
                    roll_no: None,
                },
                Student {
                    id: "bob".to_string(),
                    class_id: "c1".to_string(),
                    name: "Bob".to_string(),
                    roll_no: None,
                },
                Student {
                    id: "carol".to_string(),
                    class_id: "c2".to_string(),
                    name: "Carol".to_string(),
                    roll_no: None,
                },
            ],
            attendance: vec![],
        }
    }

    fn mark(class_id: &str, date: &str, present: &[&str]) -> MarkAttendanceCommand {
        MarkAttendanceCommand {
            class_id: class_id.to_string(),
            date: date.to_string(),
            present_student_ids: present.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
        }
    }

    #[test]
    fn test_parse_attendance_date() {
        assert!(parse_attendance_date("2024-05-01").is_ok());
        assert!(parse_attendance_date("2024-02-29").is_ok());
        assert!(parse_attendance_date("2023-02-29").is_err());
        assert!(parse_attendance_date("2024-5-1").is_err());
        assert!(parse_attendance_date("01/05/2024").is_err());
        assert!(parse_attendance_date("").is_err());
    }

    #[test]
    fn test_mark_attendance_creates_record() {
        let (dataset, record) =
            mark_attendance(&roster(), mark("c1", "2024-05-01", &["alice"])).unwrap();

        assert_eq!(dataset.attendance, vec![record.clone()]);
        assert_eq!(record.records.len(), 1);
        assert!(record.is_present("alice"));
        assert!(!record.records.contains_key("bob"));
    }

    #[test]
    fn test_mark_attendance_replaces_existing_record() {
        let (dataset, _) =
            mark_attendance(&roster(), mark("c1", "2024-05-01", &["alice", "bob"])).unwrap();
        let (dataset, _) = mark_attendance(&dataset, mark("c1", "2024-05-02", &["bob"])).unwrap();
        let (dataset, _) = mark_attendance(&dataset, mark("c1", "2024-05-01", &["bob"])).unwrap();

        assert_eq!(dataset.attendance.len(), 2);
        // upsert keeps the record's position
        assert_eq!(dataset.attendance[0].date, "2024-05-01");
        assert_eq!(dataset.attendance[0].records.keys().collect::<Vec<_>>(), vec!["bob"]);
    }

    #[test]
    fn test_mark_attendance_twice_is_idempotent() {
        let once = mark_attendance(&roster(), mark("c1", "2024-05-01", &["alice"])).unwrap().0;
        let twice = mark_attendance(&once, mark("c1", "2024-05-01", &["alice"])).unwrap().0;
        assert_eq!(once, twice);
    }

    #[test]
    fn test_mark_attendance_rejects_students_from_other_classes() {
        let dataset = roster();
        let err = mark_attendance(&dataset, mark("c1", "2024-05-01", &["alice", "carol", "ghost"]))
            .unwrap_err();

        match err {
            AttendanceError::InvalidOperation(msg) => {
                assert!(msg.contains("carol"));
                assert!(msg.contains("ghost"));
                assert!(!msg.contains("alice"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_mark_attendance_unknown_class_is_not_found() {
        let err = mark_attendance(&roster(), mark("c9", "2024-05-01", &[])).unwrap_err();
        assert!(matches!(err, AttendanceError::NotFound(_)));
    }

    #[test]
    fn test_record_attendance_keeps_explicit_absences() {
        let mut marks = BTreeMap::new();
        marks.insert("alice".to_string(), true);
        marks.insert("bob".to_string(), false);

        let (_, record) = record_attendance(
            &roster(),
            RecordAttendanceCommand {
                class_id: "c1".to_string(),
                date: "2024-05-03".to_string(),
                marks,
            },
        )
        .unwrap();

        assert_eq!(record.records.get("bob"), Some(&false));
        assert!(!record.is_present("bob"));
    }

    #[test]
    fn test_list_attendance_filters_by_class() {
        let (dataset, _) =
            mark_attendance(&roster(), mark("c1", "2024-05-01", &["alice"])).unwrap();
        let (dataset, _) = mark_attendance(&dataset, mark("c2", "2024-05-01", &["carol"])).unwrap();

        let records = list_attendance(&dataset, "c2");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].class_id, "c2");
    }
}
