pub mod attendance_mapper;
pub mod report_mapper;
pub mod roster_mapper;
