use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    codec::{self, ParsedSchedule},
    duration::SessionLength,
    grid::{Location, Placement, TimeGrid},
};

pub type SectionId = i32;

/// A section as the course-management collaborator stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRecord {
    pub id: SectionId,
    pub course_id: i32,
    pub name: String,
    #[serde(default)]
    pub schedule: String,
    pub max_capacity: i32,
    pub current_enrollment: i32,
    pub active: bool,
    #[serde(default)]
    pub duration_minutes: Option<i32>,
}

/// A section as the timetable sees it: its record attributes plus a resolved
/// grid location and session length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: SectionId,
    pub course_id: i32,
    pub name: String,
    pub max_capacity: i32,
    pub current_enrollment: i32,
    pub active: bool,
    pub location: Location,
    pub length: SessionLength,
}

impl Section {
    /// Resolves a collaborator record against `grid`.
    ///
    /// The length comes from the record's explicit duration, then from the span
    /// of its schedule string, then the default. A schedule that is not aligned
    /// to the grid or does not fit inside it loads as unscheduled.
    pub fn from_record(grid: &TimeGrid, record: &SectionRecord) -> Self {
        let parsed = codec::parse(&record.schedule);
        let length = record
            .duration_minutes
            .and_then(|minutes| u32::try_from(minutes).ok())
            .and_then(|minutes| SessionLength::new(minutes).ok())
            .or_else(|| match parsed {
                ParsedSchedule::Scheduled { .. } => {
                    SessionLength::new(parsed.duration_minutes()).ok()
                }
                ParsedSchedule::Unscheduled => None,
            })
            .unwrap_or_default();

        let location = match parsed {
            ParsedSchedule::Unscheduled => Location::Unscheduled,
            ParsedSchedule::Scheduled { day, start, .. } => match grid.tick_at(start) {
                Some(start_tick) if grid.is_within_grid(start_tick, length.ticks(grid)) => {
                    Location::Slot { day, start_tick }
                }
                _ => {
                    warn!(
                        "Section {} schedule {:?} does not fit the grid, loading it unscheduled",
                        record.id, record.schedule
                    );
                    Location::Unscheduled
                }
            },
        };

        Self {
            id: record.id,
            course_id: record.course_id,
            name: record.name.clone(),
            max_capacity: record.max_capacity,
            current_enrollment: record.current_enrollment,
            active: record.active,
            location,
            length,
        }
    }

    pub fn placement(&self, grid: &TimeGrid) -> Option<Placement> {
        match self.location {
            Location::Unscheduled => None,
            Location::Slot { day, start_tick } => Some(Placement {
                day,
                start_tick,
                ticks: self.length.ticks(grid),
            }),
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.location != Location::Unscheduled
    }

    pub fn schedule_string(&self, grid: &TimeGrid) -> String {
        match self.location {
            Location::Unscheduled => codec::UNSCHEDULED.to_string(),
            Location::Slot { day, start_tick } => {
                codec::format(day, grid.clock_at(start_tick), self.length.minutes())
            }
        }
    }

    pub fn to_record(&self, grid: &TimeGrid) -> SectionRecord {
        SectionRecord {
            id: self.id,
            course_id: self.course_id,
            name: self.name.clone(),
            schedule: self.schedule_string(grid),
            max_capacity: self.max_capacity,
            current_enrollment: self.current_enrollment,
            active: self.active,
            duration_minutes: Some(self.length.minutes() as i32),
        }
    }
}
