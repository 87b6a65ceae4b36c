//! # ClassGrid Core
//!
//! The section timetable engine. It places teaching sections on a weekly grid of
//! fixed-width ticks, rejects double-bookings, and turns each accepted move into
//! the schedule string handed to the course-management collaborator.
//!
//! ## Components
//!
//! - **grid**: the finite set of (day, tick) cells and the tick/clock mapping
//! - **codec**: `"<Day> <HH:MM>-<HH:MM>"` / `"TBD"` schedule strings
//! - **duration**: the per-section occupied span
//! - **occupancy**: which sections cover which cells
//! - **conflict**: whether a candidate placement may be committed
//! - **timetable**: the placement controller, the only place state changes
//! - **store**: the persistence collaborator seam

pub mod codec;
pub mod conflict;
pub mod duration;
pub mod errors;
pub mod grid;
pub mod models;
pub mod occupancy;
pub mod store;
pub mod timetable;
