//! # Time Grid
//!
//! The weekly grid is seven days by a fixed number of equal-width ticks that
//! cover the teaching window. Tick `n` starts at `day_start + n * tick_minutes`;
//! the window end itself is a boundary label, not a cell, so a placement may
//! finish exactly at `day_end`.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::errors::{GridError, GridResult};

/// Index of a tick within a day, counted from `day_start`.
pub type Tick = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Sunday,
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Day::Sunday => "Sunday",
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Day {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Day::ALL
            .into_iter()
            .find(|day| day.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GridError::Validation(format!("Unknown day: {}", s)))
    }
}

/// Shape of the weekly grid.
///
/// Both historical layouts are presets of the same engine: a half-hourly
/// Sunday-first grid and an hourly Monday-first grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    /// Width of one tick in minutes
    pub tick_minutes: u32,

    /// Start of the first tick
    pub day_start: NaiveTime,

    /// End of the last tick
    pub day_end: NaiveTime,

    /// First day in the canonical week order
    pub week_start: Day,
}

fn on_the_hour(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default()
}

impl GridConfig {
    /// 30-minute ticks from 08:00 to 22:00, week starting Sunday.
    pub fn half_hourly() -> Self {
        Self {
            tick_minutes: 30,
            day_start: on_the_hour(8),
            day_end: on_the_hour(22),
            week_start: Day::Sunday,
        }
    }

    /// 60-minute ticks from 08:00 to 21:00, week starting Monday.
    pub fn hourly() -> Self {
        Self {
            tick_minutes: 60,
            day_start: on_the_hour(8),
            day_end: on_the_hour(21),
            week_start: Day::Monday,
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::half_hourly()
    }
}

/// A concrete (day, start tick, tick count) assignment on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub day: Day,
    pub start_tick: Tick,
    pub ticks: usize,
}

impl Placement {
    /// First tick after the placement.
    pub fn end_tick(&self) -> Tick {
        self.start_tick + self.ticks
    }
}

/// Where a section currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Location {
    #[default]
    Unscheduled,
    Slot { day: Day, start_tick: Tick },
}

/// The validated, immutable weekly grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeGrid {
    config: GridConfig,
    tick_count: usize,
}

impl TimeGrid {
    pub fn new(config: GridConfig) -> GridResult<Self> {
        if config.tick_minutes == 0 {
            return Err(GridError::Validation(
                "Tick width must be at least one minute".to_string(),
            ));
        }

        let window = (config.day_end - config.day_start).num_minutes();
        if window <= 0 {
            return Err(GridError::Validation(format!(
                "Grid end {} must be after grid start {}",
                config.day_end.format("%H:%M"),
                config.day_start.format("%H:%M"),
            )));
        }

        let tick = i64::from(config.tick_minutes);
        if window % tick != 0 {
            return Err(GridError::Validation(format!(
                "A {} minute window cannot be split into {} minute ticks",
                window, tick
            )));
        }

        Ok(Self {
            config,
            tick_count: (window / tick) as usize,
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn tick_minutes(&self) -> u32 {
        self.config.tick_minutes
    }

    /// Number of cells per day.
    pub fn tick_count(&self) -> usize {
        self.tick_count
    }

    /// The seven days in canonical order, starting at the configured week start.
    pub fn days(&self) -> [Day; 7] {
        let offset = self.config.week_start as usize;
        std::array::from_fn(|i| Day::ALL[(offset + i) % Day::ALL.len()])
    }

    /// Ticks needed to cover `duration_minutes`, rounded up.
    pub fn ticks_for(&self, duration_minutes: u32) -> usize {
        duration_minutes.div_ceil(self.config.tick_minutes) as usize
    }

    /// True when `tick_count` ticks starting at `start_tick` fit inside one day.
    ///
    /// Every day shares the same window, so the day itself never decides the
    /// answer and is not taken.
    pub fn is_within_grid(&self, start_tick: Tick, tick_count: usize) -> bool {
        tick_count > 0
            && start_tick
                .checked_add(tick_count)
                .is_some_and(|end| end <= self.tick_count)
    }

    pub fn contains(&self, placement: &Placement) -> bool {
        self.is_within_grid(placement.start_tick, placement.ticks)
    }

    /// Wall-clock start of `tick`. Unchecked: callers pass ticks of placed sections.
    pub fn clock_at(&self, tick: Tick) -> NaiveTime {
        self.config.day_start + Duration::minutes((tick as i64) * i64::from(self.config.tick_minutes))
    }

    /// Wall-clock label of a tick boundary, including the closing `day_end`.
    pub fn time_of(&self, tick: Tick) -> Option<NaiveTime> {
        (tick <= self.tick_count).then(|| self.clock_at(tick))
    }

    /// The cell starting at `time`, if `time` is grid-aligned and inside the window.
    pub fn tick_at(&self, time: NaiveTime) -> Option<Tick> {
        let offset = (time - self.config.day_start).num_minutes();
        let width = i64::from(self.config.tick_minutes);
        if offset < 0 || offset % width != 0 {
            return None;
        }

        let tick = (offset / width) as usize;
        (tick < self.tick_count).then_some(tick)
    }

    /// Every tick boundary from `day_start` to `day_end`.
    pub fn time_labels(&self) -> Vec<NaiveTime> {
        (0..=self.tick_count).map(|tick| self.clock_at(tick)).collect()
    }
}
