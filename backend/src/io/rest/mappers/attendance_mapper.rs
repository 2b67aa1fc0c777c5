//! Mapper from the mark-attendance DTO to the domain command.

use shared::MarkAttendanceRequest;

use crate::domain::commands::attendance::{MarkAttendanceCommand, RecordAttendanceCommand};
use crate::domain::{AttendanceError, Result};

pub struct AttendanceMapper;

impl AttendanceMapper {
    /// Present ids map to `true`, absent ids to `false`. An id in both lists is rejected.
    pub fn to_record_command(
        class_id: String,
        date: String,
        dto: MarkAttendanceRequest,
    ) -> Result<RecordAttendanceCommand> {
        let mut command: RecordAttendanceCommand = MarkAttendanceCommand {
            class_id,
            date,
            present_student_ids: dto.present_student_ids.into_iter().collect(),
        }
        .into();

        for student_id in dto.absent_student_ids {
            if command.marks.get(&student_id) == Some(&true) {
                return Err(AttendanceError::invalid(format!(
                    "Student {} cannot be both present and absent",
                    student_id
                )));
            }
            command.marks.insert(student_id, false);
        }

        Ok(command)
    }
}
