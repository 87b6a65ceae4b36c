pub mod health;
pub mod sections;
pub mod timetable;
