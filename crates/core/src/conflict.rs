//! # Conflict Detection
//!
//! A candidate placement is accepted only if it lies inside the grid and every
//! cell it covers is empty once the moving section itself is ignored. There is
//! no partial-overlap tolerance and no override.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt};

use crate::{
    codec,
    duration::SessionLength,
    grid::{Day, Placement, TimeGrid},
    models::section::SectionId,
    occupancy::{CellKey, OccupancyIndex, occupied_slots},
};

/// Why a placement was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rejection {
    /// The candidate cells are held by other sections.
    Conflict { with: Vec<SectionId> },

    /// The candidate start is not a grid tick, or the span runs past the last tick.
    OutOfGrid {
        day: Day,
        #[serde(with = "codec::clock")]
        start: NaiveTime,
        duration_minutes: u32,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Conflict { with } => write!(f, "conflicts with sections {:?}", with),
            Rejection::OutOfGrid {
                day,
                start,
                duration_minutes,
            } => write!(
                f,
                "{} does not fit the grid",
                codec::format(*day, *start, *duration_minutes)
            ),
        }
    }
}

/// Sections other than `excluding` that hold any of `candidate`.
pub fn conflicting_sections(
    index: &OccupancyIndex,
    candidate: &[CellKey],
    excluding: SectionId,
) -> BTreeSet<SectionId> {
    candidate
        .iter()
        .filter_map(|cell| index.occupants(cell))
        .flatten()
        .copied()
        .filter(|id| *id != excluding)
        .collect()
}

pub fn has_conflict(index: &OccupancyIndex, candidate: &[CellKey], excluding: SectionId) -> bool {
    !conflicting_sections(index, candidate, excluding).is_empty()
}

/// Decides whether section `excluding` may start at `start` on `day` for `length`.
///
/// Returns the placement to commit, or the reason it was refused.
pub fn check_placement(
    grid: &TimeGrid,
    index: &OccupancyIndex,
    day: Day,
    start: NaiveTime,
    length: SessionLength,
    excluding: SectionId,
) -> Result<Placement, Rejection> {
    let out_of_grid = || Rejection::OutOfGrid {
        day,
        start,
        duration_minutes: length.minutes(),
    };

    let start_tick = grid.tick_at(start).ok_or_else(out_of_grid)?;
    let ticks = length.ticks(grid);
    if !grid.is_within_grid(start_tick, ticks) {
        return Err(out_of_grid());
    }

    let others = conflicting_sections(index, &occupied_slots(day, start_tick, ticks), excluding);
    if !others.is_empty() {
        return Err(Rejection::Conflict {
            with: others.into_iter().collect(),
        });
    }

    Ok(Placement {
        day,
        start_tick,
        ticks,
    })
}
