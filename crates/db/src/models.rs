use classgrid_core::models::section::SectionRecord;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSection {
    pub id: i32,
    pub course_id: i32,
    pub name: String,
    pub schedule: Option<String>,
    pub max_capacity: i32,
    pub current_enrollment: i32,
    pub active: bool,
    pub duration_minutes: Option<i32>,
}

impl From<DbSection> for SectionRecord {
    fn from(row: DbSection) -> Self {
        SectionRecord {
            id: row.id,
            course_id: row.course_id,
            name: row.name,
            schedule: row.schedule.unwrap_or_default(),
            max_capacity: row.max_capacity,
            current_enrollment: row.current_enrollment,
            active: row.active,
            duration_minutes: row.duration_minutes,
        }
    }
}
