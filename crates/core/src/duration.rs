//! Per-section session length.
//!
//! A section keeps its length whether or not it is placed, and a move never
//! changes it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    errors::{GridError, GridResult},
    grid::TimeGrid,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct SessionLength(u32);

impl SessionLength {
    pub const STEP_MINUTES: u32 = 30;
    pub const MIN_MINUTES: u32 = 30;
    pub const MAX_MINUTES: u32 = 360;
    pub const DEFAULT_MINUTES: u32 = 60;

    pub fn new(minutes: u32) -> GridResult<Self> {
        if !(Self::MIN_MINUTES..=Self::MAX_MINUTES).contains(&minutes)
            || minutes % Self::STEP_MINUTES != 0
        {
            return Err(GridError::Validation(format!(
                "Session length must be a multiple of {} between {} and {} minutes, got {}",
                Self::STEP_MINUTES,
                Self::MIN_MINUTES,
                Self::MAX_MINUTES,
                minutes
            )));
        }

        Ok(Self(minutes))
    }

    pub fn minutes(self) -> u32 {
        self.0
    }

    pub fn ticks(self, grid: &TimeGrid) -> usize {
        grid.ticks_for(self.0)
    }

    /// Every selectable length, shortest first.
    pub fn options() -> impl Iterator<Item = SessionLength> {
        (Self::MIN_MINUTES..=Self::MAX_MINUTES)
            .step_by(Self::STEP_MINUTES as usize)
            .map(SessionLength)
    }
}

impl Default for SessionLength {
    fn default() -> Self {
        Self(Self::DEFAULT_MINUTES)
    }
}

impl TryFrom<u32> for SessionLength {
    type Error = GridError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        Self::new(minutes)
    }
}

impl From<SessionLength> for u32 {
    fn from(length: SessionLength) -> Self {
        length.0
    }
}

impl fmt::Display for SessionLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.0)
    }
}
