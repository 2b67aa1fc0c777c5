//! Referential-integrity checks over a whole `Dataset`.
//!
//! There is no database engine enforcing foreign keys, so every save runs
//! these checks first.

use shared::Dataset;
use std::collections::{HashMap, HashSet};

use super::attendance::parse_attendance_date;
use super::error::{AttendanceError, Result};

/// Every invariant violation present in `dataset`, as human-readable messages
pub fn find_violations(dataset: &Dataset) -> Vec<String> {
    let mut violations = Vec::new();

    let mut class_ids = HashSet::new();
    for class in &dataset.classes {
        if !class_ids.insert(class.id.as_str()) {
            violations.push(format!("duplicate class id {}", class.id));
        }
    }

    // student id -> owning class id
    let mut student_classes: HashMap<&str, &str> = HashMap::new();
    for student in &dataset.students {
        if student_classes
            .insert(student.id.as_str(), student.class_id.as_str())
            .is_some()
        {
            violations.push(format!("duplicate student id {}", student.id));
        }
        if !class_ids.contains(student.class_id.as_str()) {
            violations.push(format!(
                "student {} references missing class {}",
                student.id, student.class_id
            ));
        }
    }

    let mut record_keys = HashSet::new();
    for record in &dataset.attendance {
        if !record_keys.insert((record.class_id.as_str(), record.date.as_str())) {
            violations.push(format!(
                "duplicate attendance record for class {} on {}",
                record.class_id, record.date
            ));
        }
        if !class_ids.contains(record.class_id.as_str()) {
            violations.push(format!(
                "attendance on {} references missing class {}",
                record.date, record.class_id
            ));
        }
        if parse_attendance_date(&record.date).is_err() {
            violations.push(format!(
                "attendance for class {} has malformed date {:?}",
                record.class_id, record.date
            ));
        }
        for student_id in record.records.keys() {
            match student_classes.get(student_id.as_str()) {
                Some(class_id) if *class_id == record.class_id => {}
                Some(_) => violations.push(format!(
                    "attendance for class {} on {} marks student {} from another class",
                    record.class_id, record.date, student_id
                )),
                None => violations.push(format!(
                    "attendance for class {} on {} references missing student {}",
                    record.class_id, record.date, student_id
                )),
            }
        }
    }

    violations
}

/// Reject `after` if it has any violation that `before` did not already have.
///
/// Violations inherited from a hand-edited blob are reported on load but do not
/// block unrelated mutations.
pub fn ensure_no_new_violations(before: &Dataset, after: &Dataset) -> Result<()> {
    let existing: HashSet<String> = find_violations(before).into_iter().collect();
    let introduced: Vec<String> = find_violations(after)
        .into_iter()
        .filter(|v| !existing.contains(v))
        .collect();

    if introduced.is_empty() {
        Ok(())
    } else {
        Err(AttendanceError::invalid(introduced.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{AttendanceRecord, ClassGroup, Student};
    use std::collections::BTreeMap;

    fn class(id: &str) -> ClassGroup {
        ClassGroup {
            id: id.to_string(),
            name: id.to_string(),
            section: None,
        }
    }

    fn student(id: &str, class_id: &str) -> Student {
        Student {
            id: id.to_string(),
            class_id: class_id.to_string(),
            name: id.to_string(),
            roll_no: None,
        }
    }

    fn record(class_id: &str, date: &str, ids: &[&str]) -> AttendanceRecord {
        AttendanceRecord {
            class_id: class_id.to_string(),
            date: date.to_string(),
            records: ids.iter().map(|id| (id.to_string(), true)).collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn test_consistent_dataset_has_no_violations() {
        let dataset = Dataset {
            classes: vec![class("c1")],
            students: vec![student("s1", "c1")],
            attendance: vec![record("c1", "2024-05-01", &["s1"])],
        };
        assert!(find_violations(&dataset).is_empty());
    }

    #[test]
    fn test_orphaned_student_is_reported() {
        let dataset = Dataset {
            classes: vec![],
            students: vec![student("s1", "c1")],
            attendance: vec![],
        };
        let violations = find_violations(&dataset);
        assert_eq!(violations, vec!["student s1 references missing class c1".to_string()]);
    }

    #[test]
    fn test_stale_and_foreign_record_keys_are_reported() {
        let dataset = Dataset {
            classes: vec![class("c1"), class("c2")],
            students: vec![student("s1", "c1"), student("s2", "c2")],
            attendance: vec![record("c1", "2024-05-01", &["s2", "ghost"])],
        };
        let violations = find_violations(&dataset);
        assert_eq!(violations.len(), 2);
        // record keys iterate in sorted order
        assert!(violations[0].contains("missing student ghost"));
        assert!(violations[1].contains("from another class"));
    }

    #[test]
    fn test_duplicate_class_date_is_reported() {
        let dataset = Dataset {
            classes: vec![class("c1")],
            students: vec![],
            attendance: vec![record("c1", "2024-05-01", &[]), record("c1", "2024-05-01", &[])],
        };
        assert_eq!(find_violations(&dataset).len(), 1);
    }

    #[test]
    fn test_inherited_violations_do_not_block() {
        let broken = Dataset {
            classes: vec![class("c1")],
            students: vec![student("s1", "missing")],
            attendance: vec![],
        };
        let mut after = broken.clone();
        after.classes.push(class("c2"));
        assert!(ensure_no_new_violations(&broken, &after).is_ok());

        after.students.push(student("s2", "also-missing"));
        let err = ensure_no_new_violations(&broken, &after).unwrap_err();
        assert!(matches!(err, AttendanceError::InvalidOperation(msg) if msg.contains("s2")));
    }
}
