use log::{info, warn};
use shared::{ClassGroup, Student};
use std::sync::Arc;

use super::commands::classes::{CreateClassCommand, UpdateClassCommand};
use super::commands::students::{CreateStudentCommand, DeleteStudentResult, UpdateStudentCommand};
use super::dataset_store::DatasetStore;
use super::error::{AttendanceError, Result};
use super::roster;
use crate::storage::DatasetStorage;

/// Service for managing classes and their students
pub struct RosterService<S: DatasetStorage> {
    store: DatasetStore<S>,
}

impl<S: DatasetStorage> Clone for RosterService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: DatasetStorage> RosterService<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            store: DatasetStore::new(storage),
        }
    }

    /// Create a new class
    pub async fn add_class(&self, command: CreateClassCommand) -> Result<ClassGroup> {
        info!("Creating class: name={}, section={:?}", command.name, command.section);

        let class = self.store.apply(|dataset| roster::add_class(dataset, command)).await?;

        info!("Created class: {} with ID: {}", class.name, class.id);
        Ok(class)
    }

    /// Replace a class's name and section in place
    pub async fn update_class(&self, command: UpdateClassCommand) -> Result<ClassGroup> {
        info!("Updating class: {}", command.class_id);

        let class = self.store.apply(|dataset| roster::update_class(dataset, command)).await?;

        info!("Updated class: {} with ID: {}", class.name, class.id);
        Ok(class)
    }

    pub async fn get_class(&self, class_id: &str) -> Result<ClassGroup> {
        let dataset = self.store.load().await?;
        dataset.find_class(class_id).cloned().ok_or_else(|| {
            warn!("Class not found: {}", class_id);
            AttendanceError::class_not_found(class_id)
        })
    }

    /// All classes in stored order
    pub async fn list_classes(&self) -> Result<Vec<ClassGroup>> {
        let classes = self.store.load().await?.classes;
        info!("Found {} classes", classes.len());
        Ok(classes)
    }

    /// Enroll a new student in an existing class
    pub async fn add_student(&self, command: CreateStudentCommand) -> Result<Student> {
        info!("Creating student: name={} in class {}", command.name, command.class_id);

        let student = self.store.apply(|dataset| roster::add_student(dataset, command)).await?;

        info!("Created student: {} with ID: {}", student.name, student.id);
        Ok(student)
    }

    pub async fn update_student(&self, command: UpdateStudentCommand) -> Result<Student> {
        info!("Updating student: {}", command.student_id);

        let student = self.store.apply(|dataset| roster::update_student(dataset, command)).await?;

        info!("Updated student: {} with ID: {}", student.name, student.id);
        Ok(student)
    }

    pub async fn get_student(&self, student_id: &str) -> Result<Student> {
        let dataset = self.store.load().await?;
        dataset.find_student(student_id).cloned().ok_or_else(|| {
            warn!("Student not found: {}", student_id);
            AttendanceError::student_not_found(student_id)
        })
    }

    /// Delete a student and purge it from every attendance record
    pub async fn delete_student(&self, student_id: &str) -> Result<DeleteStudentResult> {
        info!("Deleting student: {}", student_id);

        let result = self
            .store
            .apply(|dataset| roster::delete_student(dataset, student_id))
            .await?;

        info!(
            "Deleted student: {} with ID: {} (purged from {} attendance records)",
            result.deleted_student.name, result.deleted_student.id, result.purged_record_count
        );
        Ok(result)
    }

    /// Students of a class in stored insertion order
    pub async fn list_students(&self, class_id: &str) -> Result<Vec<Student>> {
        let dataset = self.store.load().await?;
        if dataset.find_class(class_id).is_none() {
            warn!("List students requested for unknown class {}", class_id);
            return Err(AttendanceError::class_not_found(class_id));
        }
        let students = roster::list_students(&dataset, class_id);
        info!("Found {} students in class {}", students.len(), class_id);
        Ok(students)
    }
}
