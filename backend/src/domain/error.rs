use thiserror::Error;

/// Failures surfaced by the domain layer.
///
/// None of these are fatal to the process; the IO layer turns each into a
/// dismissible notice for the user.
#[derive(Error, Debug)]
pub enum AttendanceError {
    /// The dataset blob could not be read or written. In-memory state is unchanged.
    #[error("Storage unavailable: {0}")]
    StoreUnavailable(String),

    /// A referenced id does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// The operation would violate a dataset invariant and was not applied
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// The report has no rows, so there is nothing to export
    #[error("No attendance data to export for this month")]
    EmptyReport,
}

impl AttendanceError {
    /// Wrap a storage failure, keeping the whole context chain in the message
    pub fn store(err: anyhow::Error) -> Self {
        AttendanceError::StoreUnavailable(format!("{:#}", err))
    }

    pub fn class_not_found(class_id: &str) -> Self {
        AttendanceError::NotFound(format!("Class {}", class_id))
    }

    pub fn student_not_found(student_id: &str) -> Self {
        AttendanceError::NotFound(format!("Student {}", student_id))
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        AttendanceError::InvalidOperation(message.into())
    }
}

pub type Result<T> = std::result::Result<T, AttendanceError>;
