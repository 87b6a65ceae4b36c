//! # Schedule Codec
//!
//! Schedule strings are the only representation of a placement that leaves the
//! engine. They look like `"Sunday 09:00-10:30"`, or `"TBD"` for a section that
//! is not on the grid.
//!
//! Parsing is lenient: anything that is not a well-formed schedule string reads
//! as unscheduled. Nothing is written back until the section is moved, so the
//! fallback never persists a wrong placement.

use chrono::{Duration, NaiveDate, NaiveTime};
use tracing::debug;

use crate::{duration::SessionLength, grid::Day};

/// Schedule string of a section with no placement.
pub const UNSCHEDULED: &str = "TBD";

const CLOCK_FORMAT: &str = "%H:%M";

/// Result of reading a schedule string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedSchedule {
    Unscheduled,
    Scheduled {
        day: Day,
        start: NaiveTime,
        duration_minutes: u32,
    },
}

impl ParsedSchedule {
    /// Span carried by the string, or the default session length when there is none.
    pub fn duration_minutes(&self) -> u32 {
        match self {
            ParsedSchedule::Unscheduled => SessionLength::default().minutes(),
            ParsedSchedule::Scheduled {
                duration_minutes, ..
            } => *duration_minutes,
        }
    }
}

/// Reads a schedule string. Empty input, `"TBD"` and malformed strings are all
/// [`ParsedSchedule::Unscheduled`].
pub fn parse(input: &str) -> ParsedSchedule {
    let input = input.trim();
    if input.is_empty() || input == UNSCHEDULED {
        return ParsedSchedule::Unscheduled;
    }

    match parse_scheduled(input) {
        Some(parsed) => parsed,
        None => {
            debug!("Treating malformed schedule string {:?} as unscheduled", input);
            ParsedSchedule::Unscheduled
        }
    }
}

fn parse_scheduled(input: &str) -> Option<ParsedSchedule> {
    let mut tokens = input.split_whitespace();
    let (day, range) = (tokens.next()?, tokens.next()?);
    if tokens.next().is_some() {
        return None;
    }

    let day: Day = day.parse().ok()?;
    let (start, end) = range.split_once('-')?;
    let start = parse_clock(start)?;
    let end = parse_clock(end)?;

    // Both ends are pinned to one reference date so a wrapped range is negative.
    let reference = NaiveDate::default();
    let span = (reference.and_time(end) - reference.and_time(start)).num_minutes();
    let duration_minutes = u32::try_from(span).ok().filter(|minutes| *minutes > 0)?;

    Some(ParsedSchedule::Scheduled {
        day,
        start,
        duration_minutes,
    })
}

/// Renders `"<Day> <HH:MM>-<HH:MM>"` with the end computed from the duration.
pub fn format(day: Day, start: NaiveTime, duration_minutes: u32) -> String {
    format!(
        "{} {}-{}",
        day,
        format_clock(start),
        format_clock(end_time(start, duration_minutes))
    )
}

pub fn end_time(start: NaiveTime, duration_minutes: u32) -> NaiveTime {
    start + Duration::minutes(i64::from(duration_minutes))
}

pub fn format_clock(time: NaiveTime) -> String {
    time.format(CLOCK_FORMAT).to_string()
}

pub fn parse_clock(input: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), CLOCK_FORMAT).ok()
}

/// Serde adapter for `HH:MM` clock fields.
pub mod clock {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_clock(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_clock(&raw)
            .ok_or_else(|| D::Error::custom(format!("expected HH:MM, got {:?}", raw)))
    }
}
