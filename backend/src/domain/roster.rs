//! Pure roster transformations.
//!
//! Each function takes the current dataset by reference and returns a new
//! dataset plus the affected entity. Nothing here touches storage; a failed
//! call leaves the caller's dataset untouched.

use shared::{ClassGroup, Dataset, Student};
use uuid::Uuid;

use super::commands::classes::{CreateClassCommand, UpdateClassCommand};
use super::commands::students::{CreateStudentCommand, DeleteStudentResult, UpdateStudentCommand};
use super::error::{AttendanceError, Result};

/// Generate a fresh "<prefix>::<uuid>" id that is not already taken
pub fn generate_id(prefix: &str, is_taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = format!("{}::{}", prefix, Uuid::new_v4().simple());
        if !is_taken(&id) {
            return id;
        }
    }
}

/// Trim a required display name, rejecting empty values
pub fn normalize_name(name: &str, what: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AttendanceError::invalid(format!("{} name cannot be empty", what)));
    }
    Ok(trimmed.to_string())
}

/// Blank optional fields are stored as absent
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn add_class(dataset: &Dataset, command: CreateClassCommand) -> Result<(Dataset, ClassGroup)> {
    let name = normalize_name(&command.name, "Class")?;

    let class = ClassGroup {
        id: generate_id("class", |id| dataset.find_class(id).is_some()),
        name,
        section: normalize_optional(command.section),
    };

    let mut next = dataset.clone();
    next.classes.push(class.clone());
    Ok((next, class))
}

pub fn update_class(
    dataset: &Dataset,
    command: UpdateClassCommand,
) -> Result<(Dataset, ClassGroup)> {
    let position = dataset
        .classes
        .iter()
        .position(|c| c.id == command.class_id)
        .ok_or_else(|| AttendanceError::class_not_found(&command.class_id))?;
    let name = normalize_name(&command.name, "Class")?;

    let mut next = dataset.clone();
    let class = &mut next.classes[position];
    class.name = name;
    class.section = normalize_optional(command.section);
    let updated = class.clone();

    Ok((next, updated))
}

pub fn add_student(dataset: &Dataset, command: CreateStudentCommand) -> Result<(Dataset, Student)> {
    if dataset.find_class(&command.class_id).is_none() {
        return Err(AttendanceError::class_not_found(&command.class_id));
    }
    let name = normalize_name(&command.name, "Student")?;

    let student = Student {
        id: generate_id("student", |id| dataset.find_student(id).is_some()),
        class_id: command.class_id,
        name,
        roll_no: normalize_optional(command.roll_no),
    };

    let mut next = dataset.clone();
    next.students.push(student.clone());
    Ok((next, student))
}

pub fn update_student(
    dataset: &Dataset,
    command: UpdateStudentCommand,
) -> Result<(Dataset, Student)> {
    let position = dataset
        .students
        .iter()
        .position(|s| s.id == command.student_id)
        .ok_or_else(|| AttendanceError::student_not_found(&command.student_id))?;
    let name = normalize_name(&command.name, "Student")?;

    let mut next = dataset.clone();
    let student = &mut next.students[position];
    student.name = name;
    student.roll_no = normalize_optional(command.roll_no);
    let updated = student.clone();

    Ok((next, updated))
}

/// Remove a student and purge its key from every attendance record
pub fn delete_student(
    dataset: &Dataset,
    student_id: &str,
) -> Result<(Dataset, DeleteStudentResult)> {
    let position = dataset
        .students
        .iter()
        .position(|s| s.id == student_id)
        .ok_or_else(|| AttendanceError::student_not_found(student_id))?;

    let mut next = dataset.clone();
    let deleted_student = next.students.remove(position);

    let mut purged_record_count = 0;
    for record in next.attendance.iter_mut() {
        if record.records.remove(student_id).is_some() {
            purged_record_count += 1;
        }
    }

    Ok((
        next,
        DeleteStudentResult {
            deleted_student,
            purged_record_count,
        },
    ))
}

/// Students of a class in stored insertion order
pub fn list_students(dataset: &Dataset, class_id: &str) -> Vec<Student> {
    dataset.students_in_class(class_id).cloned().collect()
}
