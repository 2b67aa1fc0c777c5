use log::info;
use shared::AttendanceRecord;
use std::sync::Arc;

use super::attendance;
use super::commands::attendance::{MarkAttendanceCommand, RecordAttendanceCommand};
use super::dataset_store::DatasetStore;
use super::error::{AttendanceError, Result};
use crate::storage::DatasetStorage;

/// Service for taking and reading attendance
pub struct AttendanceService<S: DatasetStorage> {
    store: DatasetStore<S>,
}

impl<S: DatasetStorage> Clone for AttendanceService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: DatasetStorage> AttendanceService<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            store: DatasetStore::new(storage),
        }
    }

    /// Mark the given students present, replacing any earlier record for the date
    pub async fn mark_attendance(
        &self,
        command: MarkAttendanceCommand,
    ) -> Result<AttendanceRecord> {
        info!(
            "Marking attendance for class {} on {}: {} present",
            command.class_id,
            command.date,
            command.present_student_ids.len()
        );
        self.record_attendance(command.into()).await
    }

    /// Record explicit present/absent marks, replacing any earlier record for the date
    pub async fn record_attendance(
        &self,
        command: RecordAttendanceCommand,
    ) -> Result<AttendanceRecord> {
        let record = self
            .store
            .apply(|dataset| attendance::record_attendance(dataset, command))
            .await?;

        info!(
            "Saved attendance for class {} on {} ({} marks)",
            record.class_id,
            record.date,
            record.records.len()
        );
        Ok(record)
    }

    /// The record for a class on a date, if attendance was taken
    pub async fn get_attendance(
        &self,
        class_id: &str,
        date: &str,
    ) -> Result<Option<AttendanceRecord>> {
        attendance::parse_attendance_date(date)?;
        let dataset = self.store.load().await?;
        if dataset.find_class(class_id).is_none() {
            return Err(AttendanceError::class_not_found(class_id));
        }
        Ok(dataset.find_attendance(class_id, date).cloned())
    }

    pub async fn list_attendance(&self, class_id: &str) -> Result<Vec<AttendanceRecord>> {
        let dataset = self.store.load().await?;
        if dataset.find_class(class_id).is_none() {
            return Err(AttendanceError::class_not_found(class_id));
        }
        Ok(attendance::list_attendance(&dataset, class_id))
    }
}
