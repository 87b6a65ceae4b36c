//! # Section Store
//!
//! The course-management collaborator owns section records. The timetable reads
//! them once, then reports every committed change back through this trait.

use async_trait::async_trait;
use chrono::NaiveTime;
use eyre::Result;

use crate::{
    codec,
    duration::SessionLength,
    grid::Day,
    models::section::{SectionId, SectionRecord},
};

/// Schedule fields reported after a commit. `day` and `start_time` are `None`
/// when the section was unscheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleUpdate {
    pub day: Option<Day>,
    pub start_time: Option<NaiveTime>,
    pub duration_minutes: u32,
}

impl ScheduleUpdate {
    pub fn unscheduled(length: SessionLength) -> Self {
        Self {
            day: None,
            start_time: None,
            duration_minutes: length.minutes(),
        }
    }

    pub fn placed(day: Day, start_time: NaiveTime, length: SessionLength) -> Self {
        Self {
            day: Some(day),
            start_time: Some(start_time),
            duration_minutes: length.minutes(),
        }
    }

    /// The schedule string to persist for this update.
    pub fn schedule_string(&self) -> String {
        match (self.day, self.start_time) {
            (Some(day), Some(start)) => codec::format(day, start, self.duration_minutes),
            _ => codec::UNSCHEDULED.to_string(),
        }
    }
}

#[async_trait]
pub trait SectionStore: Send + Sync {
    /// Every section the timetable should manage.
    async fn load_sections(&self) -> Result<Vec<SectionRecord>>;

    /// Called after every committed move, including moves to the unscheduled pool.
    async fn on_schedule_update(&self, section_id: SectionId, update: ScheduleUpdate) -> Result<()>;

    /// Called instead of `on_schedule_update` when a commit changed a
    /// non-schedule attribute, such as the session length. `section` holds the
    /// new schedule string too, and must be written in one step.
    async fn on_section_update(&self, section: SectionRecord) -> Result<()>;
}
