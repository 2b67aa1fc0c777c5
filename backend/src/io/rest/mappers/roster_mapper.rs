//! Mappers from roster request DTOs to domain commands.

use shared::{CreateClassRequest, CreateStudentRequest, UpdateClassRequest, UpdateStudentRequest};

use crate::domain::commands::classes::{CreateClassCommand, UpdateClassCommand};
use crate::domain::commands::students::{CreateStudentCommand, UpdateStudentCommand};

pub struct RosterMapper;

impl RosterMapper {
    pub fn to_create_class_command(dto: CreateClassRequest) -> CreateClassCommand {
        CreateClassCommand {
            name: dto.name,
            section: dto.section,
        }
    }

    pub fn to_update_class_command(
        class_id: String,
        dto: UpdateClassRequest,
    ) -> UpdateClassCommand {
        UpdateClassCommand {
            class_id,
            name: dto.name,
            section: dto.section,
        }
    }

    pub fn to_create_student_command(
        class_id: String,
        dto: CreateStudentRequest,
    ) -> CreateStudentCommand {
        CreateStudentCommand {
            class_id,
            name: dto.name,
            roll_no: dto.roll_no,
        }
    }

    pub fn to_update_student_command(
        student_id: String,
        dto: UpdateStudentRequest,
    ) -> UpdateStudentCommand {
        UpdateStudentCommand {
            student_id,
            name: dto.name,
            roll_no: dto.roll_no,
        }
    }
}
