//! # Occupancy Index
//!
//! Maps every occupied (day, tick) cell to the sections covering it, and keeps
//! the unscheduled pool beside it. Cells with no occupant are not stored, so
//! two indexes holding the same placements compare equal.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::{
    grid::{Day, Placement, Tick, TimeGrid},
    models::section::{Section, SectionId},
};

/// One (day, tick) cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellKey {
    pub day: Day,
    pub tick: Tick,
}

/// Cells a placement starting at `start_tick` would cover, without touching any index.
pub fn occupied_slots(day: Day, start_tick: Tick, duration_ticks: usize) -> Vec<CellKey> {
    (start_tick..start_tick + duration_ticks)
        .map(|tick| CellKey { day, tick })
        .collect()
}

pub fn cells_of(placement: &Placement) -> Vec<CellKey> {
    occupied_slots(placement.day, placement.start_tick, placement.ticks)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupancyIndex {
    cells: BTreeMap<CellKey, BTreeSet<SectionId>>,
    unscheduled: BTreeSet<SectionId>,
}

impl OccupancyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes every section as-is. Overlapping placements are recorded as
    /// multi-occupant cells rather than rejected.
    pub fn build<'a, I>(grid: &TimeGrid, sections: I) -> Self
    where
        I: IntoIterator<Item = &'a Section>,
    {
        let mut index = Self::new();
        for section in sections {
            match section.placement(grid) {
                Some(placement) => index.insert(section.id, &cells_of(&placement)),
                None => index.park(section.id),
            }
        }
        index
    }

    pub fn insert(&mut self, id: SectionId, cells: &[CellKey]) {
        for cell in cells {
            self.cells.entry(*cell).or_default().insert(id);
        }
    }

    pub fn remove(&mut self, id: SectionId, cells: &[CellKey]) {
        for cell in cells {
            if let Some(occupants) = self.cells.get_mut(cell) {
                occupants.remove(&id);
                if occupants.is_empty() {
                    self.cells.remove(cell);
                }
            }
        }
    }

    /// Adds `id` to the unscheduled pool.
    pub fn park(&mut self, id: SectionId) {
        self.unscheduled.insert(id);
    }

    pub fn unpark(&mut self, id: SectionId) {
        self.unscheduled.remove(&id);
    }

    pub fn occupants(&self, cell: &CellKey) -> Option<&BTreeSet<SectionId>> {
        self.cells.get(cell)
    }

    pub fn cells(&self) -> impl Iterator<Item = (&CellKey, &BTreeSet<SectionId>)> {
        self.cells.iter()
    }

    pub fn unscheduled(&self) -> &BTreeSet<SectionId> {
        &self.unscheduled
    }

    pub fn is_unscheduled(&self, id: SectionId) -> bool {
        self.unscheduled.contains(&id)
    }

    /// Cells currently holding `id`, in grid order.
    pub fn cells_holding(&self, id: SectionId) -> Vec<CellKey> {
        self.cells
            .iter()
            .filter(|(_, occupants)| occupants.contains(&id))
            .map(|(cell, _)| *cell)
            .collect()
    }

    /// Largest occupant count of any cell; never above one in a conflict-free index.
    pub fn max_occupancy(&self) -> usize {
        self.cells.values().map(BTreeSet::len).max().unwrap_or(0)
    }
}
