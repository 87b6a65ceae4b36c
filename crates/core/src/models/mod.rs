pub mod section;
pub mod timetable;
