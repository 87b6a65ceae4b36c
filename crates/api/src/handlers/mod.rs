pub mod sections;
pub mod timetable;
