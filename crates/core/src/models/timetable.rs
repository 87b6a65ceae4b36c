use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::{
    codec,
    conflict::Rejection,
    grid::{Day, TimeGrid},
    models::section::{Section, SectionId},
    occupancy::CellKey,
    timetable::MovePhase,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionView {
    pub id: SectionId,
    pub course_id: i32,
    pub name: String,
    pub schedule: String,
    pub max_capacity: i32,
    pub current_enrollment: i32,
    pub active: bool,
    pub duration_minutes: u32,
}

impl SectionView {
    pub fn new(section: &Section, grid: &TimeGrid) -> Self {
        Self {
            id: section.id,
            course_id: section.course_id,
            name: section.name.clone(),
            schedule: section.schedule_string(grid),
            max_capacity: section.max_capacity,
            current_enrollment: section.current_enrollment,
            active: section.active,
            duration_minutes: section.length.minutes(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedSection {
    pub section: SectionView,
    pub day: Day,
    #[serde(with = "codec::clock")]
    pub start: NaiveTime,
    #[serde(with = "codec::clock")]
    pub end: NaiveTime,
    pub cells: Vec<CellKey>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableView {
    pub days: Vec<Day>,
    pub times: Vec<String>,
    pub tick_minutes: u32,
    pub duration_options: Vec<u32>,
    pub placed: Vec<PlacedSection>,
    pub unscheduled: Vec<SectionView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDurationRequest {
    pub minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResponse {
    pub phase: MovePhase,
    pub section: SectionView,
    /// Why the change was refused; absent on commit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection: Option<Rejection>,
}
