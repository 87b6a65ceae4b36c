//! # Placement Controller
//!
//! Every schedule mutation goes through [`Timetable`]. Operations take `&self`
//! and return a [`Transition`]: the next state plus what happened. A rejected
//! transition carries a state equal to the input, so callers can swap states
//! unconditionally.
//!
//! Each move walks `Idle -> Validating -> Committed | RolledBack`:
//!
//! 1. The section's length comes from the section, never from the source cells.
//! 2. A move to the unscheduled pool always commits.
//! 3. Any other destination is checked against the index with the moving
//!    section excluded. A refusal leaves the index untouched.
//! 4. A commit vacates the source, fills the destination and yields the new
//!    schedule string for the collaborator.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};
use tracing::{debug, info, warn};

use crate::{
    codec,
    conflict::{self, Rejection},
    duration::SessionLength,
    errors::{GridError, GridResult},
    grid::{Day, Location, Placement, TimeGrid},
    models::{
        section::{Section, SectionId, SectionRecord},
        timetable::{PlacedSection, SectionView, TimetableView},
    },
    occupancy::{OccupancyIndex, cells_of},
    store::{ScheduleUpdate, SectionStore},
};

/// A grid location as the caller names it: a day and a wall-clock start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Target {
    Unscheduled,
    Slot {
        day: Day,
        #[serde(with = "codec::clock")]
        start: NaiveTime,
    },
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Unscheduled => f.write_str(codec::UNSCHEDULED),
            Target::Slot { day, start } => write!(f, "{} {}", day, codec::format_clock(*start)),
        }
    }
}

/// One completed drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCommand {
    pub section_id: SectionId,
    pub source: Target,
    pub destination: Target,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovePhase {
    Idle,
    Validating,
    Committed,
    RolledBack,
}

/// What the collaborator must persist for an accepted change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub section_id: SectionId,
    pub update: ScheduleUpdate,
    pub schedule: String,
    /// Full record, reported instead of `update` when a non-schedule
    /// attribute changed. It carries the new schedule string as well.
    pub section_update: Option<SectionRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Committed(Commit),
    RolledBack(Rejection),
}

impl MoveOutcome {
    pub fn phase(&self) -> MovePhase {
        match self {
            MoveOutcome::Committed(_) => MovePhase::Committed,
            MoveOutcome::RolledBack(_) => MovePhase::RolledBack,
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, MoveOutcome::Committed(_))
    }
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub state: Timetable,
    pub outcome: MoveOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timetable {
    grid: TimeGrid,
    sections: BTreeMap<SectionId, Section>,
    index: OccupancyIndex,
}

impl Timetable {
    pub fn new(grid: TimeGrid) -> Self {
        Self {
            grid,
            sections: BTreeMap::new(),
            index: OccupancyIndex::new(),
        }
    }

    /// Builds a timetable from collaborator records.
    ///
    /// Records that overlap are settled first come first served by id: the
    /// lower id keeps its cells and the other section loads unscheduled.
    pub fn load<I>(grid: TimeGrid, records: I) -> Self
    where
        I: IntoIterator<Item = SectionRecord>,
    {
        let mut sections: BTreeMap<SectionId, Section> = records
            .into_iter()
            .map(|record| (record.id, Section::from_record(&grid, &record)))
            .collect();

        let mut index = OccupancyIndex::build(&grid, sections.values());
        for section in sections.values_mut() {
            let Some(placement) = section.placement(&grid) else {
                continue;
            };

            let cells = cells_of(&placement);
            let holders = conflict::conflicting_sections(&index, &cells, section.id);
            if holders.iter().any(|other| *other < section.id) {
                warn!(
                    "Section {} overlaps sections {:?} on load, moving it to the unscheduled pool",
                    section.id, holders
                );
                index.remove(section.id, &cells);
                index.park(section.id);
                section.location = Location::Unscheduled;
            }
        }

        info!(
            "Loaded {} sections, {} unscheduled",
            sections.len(),
            index.unscheduled().len()
        );

        Self {
            grid,
            sections,
            index,
        }
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub fn index(&self) -> &OccupancyIndex {
        &self.index
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    pub fn section(&self, id: SectionId) -> GridResult<&Section> {
        self.sections
            .get(&id)
            .ok_or_else(|| GridError::NotFound(format!("Section with ID {} not found", id)))
    }

    /// Where `section` sits, in the caller's terms.
    pub fn target_of(&self, section: &Section) -> Target {
        match section.location {
            Location::Unscheduled => Target::Unscheduled,
            Location::Slot { day, start_tick } => Target::Slot {
                day,
                start: self.grid.clock_at(start_tick),
            },
        }
    }

    /// Applies a move command.
    ///
    /// # Errors
    ///
    /// * `GridError::NotFound` - the section does not exist
    /// * `GridError::StaleMove` - `source` is not where the section currently is
    pub fn move_section(&self, command: &MoveCommand) -> GridResult<Transition> {
        let section = self.section(command.section_id)?;
        let current = self.target_of(section);
        if current != command.source {
            return Err(GridError::StaleMove(format!(
                "Section {} is at {}, not {}",
                section.id, current, command.source
            )));
        }

        debug!(
            section_id = section.id,
            phase = ?MovePhase::Validating,
            "Moving section from {} to {}",
            command.source,
            command.destination
        );

        let length = section.length;
        let transition = match command.destination {
            Target::Unscheduled => {
                let mut next = self.clone();
                next.relocate(section.id, None);
                self.committed(next, section.id, ScheduleUpdate::unscheduled(length), None)
            }
            Target::Slot { day, start } => {
                match conflict::check_placement(&self.grid, &self.index, day, start, length, section.id) {
                    Ok(placement) => {
                        let mut next = self.clone();
                        next.relocate(section.id, Some(placement));
                        self.committed(
                            next,
                            section.id,
                            ScheduleUpdate::placed(day, start, length),
                            None,
                        )
                    }
                    Err(rejection) => self.rolled_back(section.id, rejection),
                }
            }
        };

        Ok(transition)
    }

    /// Changes a section's session length.
    ///
    /// A placed section is re-checked over its new span from the same start; a
    /// conflict or grid overflow refuses the change and keeps the old length.
    ///
    /// # Errors
    ///
    /// * `GridError::Validation` - `minutes` is not a selectable length
    /// * `GridError::NotFound` - the section does not exist
    pub fn set_duration(&self, id: SectionId, minutes: u32) -> GridResult<Transition> {
        let length = SessionLength::new(minutes)?;
        let section = self.section(id)?;

        debug!(
            section_id = id,
            phase = ?MovePhase::Validating,
            "Changing session length from {} to {}",
            section.length,
            length
        );

        let transition = match section.location {
            Location::Unscheduled => {
                let mut next = self.clone();
                next.set_length(id, length);
                let record = next.record_of(id);
                self.committed(next, id, ScheduleUpdate::unscheduled(length), record)
            }
            Location::Slot { day, start_tick } => {
                let start = self.grid.clock_at(start_tick);
                match conflict::check_placement(&self.grid, &self.index, day, start, length, id) {
                    Ok(placement) => {
                        let mut next = self.clone();
                        next.set_length(id, length);
                        next.relocate(id, Some(placement));
                        let record = next.record_of(id);
                        self.committed(next, id, ScheduleUpdate::placed(day, start, length), record)
                    }
                    Err(rejection) => self.rolled_back(id, rejection),
                }
            }
        };

        Ok(transition)
    }

    /// Board view for rendering.
    pub fn view(&self) -> TimetableView {
        let mut placed = Vec::new();
        let mut unscheduled = Vec::new();

        for section in self.sections.values() {
            let view = SectionView::new(section, &self.grid);
            match section.location {
                Location::Unscheduled => unscheduled.push(view),
                Location::Slot { day, start_tick } => {
                    let start = self.grid.clock_at(start_tick);
                    placed.push(PlacedSection {
                        day,
                        start,
                        end: codec::end_time(start, section.length.minutes()),
                        cells: self.index.cells_holding(section.id),
                        section: view,
                    });
                }
            }
        }

        TimetableView {
            days: self.grid.days().to_vec(),
            times: self
                .grid
                .time_labels()
                .into_iter()
                .map(codec::format_clock)
                .collect(),
            tick_minutes: self.grid.tick_minutes(),
            duration_options: SessionLength::options().map(SessionLength::minutes).collect(),
            placed,
            unscheduled,
        }
    }

    fn committed(
        &self,
        next: Timetable,
        id: SectionId,
        update: ScheduleUpdate,
        section_update: Option<SectionRecord>,
    ) -> Transition {
        let schedule = update.schedule_string();
        debug!(section_id = id, phase = ?MovePhase::Committed, "Section {} is now {}", id, schedule);

        Transition {
            state: next,
            outcome: MoveOutcome::Committed(Commit {
                section_id: id,
                update,
                schedule,
                section_update,
            }),
        }
    }

    fn rolled_back(&self, id: SectionId, rejection: Rejection) -> Transition {
        debug!(section_id = id, phase = ?MovePhase::RolledBack, "Move refused: {}", rejection);

        Transition {
            state: self.clone(),
            outcome: MoveOutcome::RolledBack(rejection),
        }
    }

    /// Moves `id` out of its current cells or the pool and into `placement`,
    /// or into the pool when `placement` is `None`.
    fn relocate(&mut self, id: SectionId, placement: Option<Placement>) {
        let Some(section) = self.sections.get_mut(&id) else {
            return;
        };

        match section.placement(&self.grid) {
            Some(current) => self.index.remove(id, &cells_of(&current)),
            None => self.index.unpark(id),
        }

        match placement {
            Some(placement) => {
                self.index.insert(id, &cells_of(&placement));
                section.location = Location::Slot {
                    day: placement.day,
                    start_tick: placement.start_tick,
                };
            }
            None => {
                self.index.park(id);
                section.location = Location::Unscheduled;
            }
        }
    }

    fn set_length(&mut self, id: SectionId, length: SessionLength) {
        let Some(section) = self.sections.get_mut(&id) else {
            return;
        };

        // Vacate with the old span before the new one is recorded.
        if let Some(current) = section.placement(&self.grid) {
            self.index.remove(id, &cells_of(&current));
            self.index.park(id);
            section.location = Location::Unscheduled;
        }
        section.length = length;
    }

    fn record_of(&self, id: SectionId) -> Option<SectionRecord> {
        self.sections
            .get(&id)
            .map(|section| section.to_record(&self.grid))
    }
}

/// Reports a committed transition to `store`, then installs it.
///
/// `timetable` is only replaced once the collaborator has accepted the change,
/// so a failed or cancelled call leaves the previous state in place. Callers
/// hold the timetable lock across this call, which makes every other reader
/// wait for the outcome. A rejected transition never reaches the collaborator.
pub async fn apply<S>(
    timetable: &mut Timetable,
    store: &S,
    transition: Transition,
) -> GridResult<MoveOutcome>
where
    S: SectionStore + ?Sized,
{
    let Transition { state, outcome } = transition;
    let MoveOutcome::Committed(commit) = &outcome else {
        return Ok(outcome);
    };

    if let Err(err) = persist(store, commit).await {
        warn!(
            "Persisting section {} failed, keeping its previous placement: {}",
            commit.section_id, err
        );
        return Err(GridError::Persistence(err));
    }

    *timetable = state;
    Ok(outcome)
}

/// One commit is one collaborator call.
async fn persist<S>(store: &S, commit: &Commit) -> eyre::Result<()>
where
    S: SectionStore + ?Sized,
{
    match &commit.section_update {
        Some(record) => store.on_section_update(record.clone()).await,
        None => store.on_schedule_update(commit.section_id, commit.update).await,
    }
}
