//! Late-arrival computation for submitted attendance entries.
//!
//! Arrival times come in as free text from the recording form. A missing or
//! blank time counts as arriving exactly on time; anything else must be
//! strict 24-hour `HH:MM`. Students arriving after the expected time get a
//! lateness note appended to their comment, which is also what the
//! statistics side later counts as a late arrival.

use crate::error::{Error, Result};
use chrono::NaiveTime;
use serde::Deserialize;

/// One submitted attendance entry for a single student.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AttendanceEntry {
    pub student_id: i32,
    pub status_id: i32,
    pub arrival_time: Option<String>,
    pub comment: Option<String>,
}

/// The time everyone is expected in class.
pub fn expected_arrival() -> NaiveTime {
    NaiveTime::from_hms_opt(8, 0, 0).expect("08:00 is a valid time of day")
}

/// Parses a submitted arrival time.
///
/// Absent or blank input means the student was on time. Anything else must
/// match `HH:MM` with hours 00-23 and minutes 00-59.
pub fn parse_arrival(raw: Option<&str>) -> Result<NaiveTime> {
    let Some(raw) = raw else {
        return Ok(expected_arrival());
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(expected_arrival());
    }

    let invalid = || Error::InvalidArrivalTime(raw.to_string());
    let (hours, minutes) = trimmed.split_once(':').ok_or_else(invalid)?;
    if hours.len() != 2 || minutes.len() != 2 {
        return Err(invalid());
    }
    if !hours.bytes().all(|b| b.is_ascii_digit()) || !minutes.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let hour: u32 = hours.parse().map_err(|_| invalid())?;
    let minute: u32 = minutes.parse().map_err(|_| invalid())?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

/// Whole minutes of lateness relative to the expected arrival. Zero when on
/// time or early.
pub fn delay_minutes(arrival: NaiveTime) -> i64 {
    (arrival - expected_arrival()).num_minutes().max(0)
}

/// Appends the lateness note to a submitted comment.
///
/// A zero delay leaves the comment untouched. An existing non-empty comment
/// is joined with `" | "`; otherwise the note becomes the whole comment.
pub fn annotate_comment(comment: Option<&str>, delay: i64) -> Option<String> {
    if delay <= 0 {
        return comment.map(str::to_string);
    }
    let note = format!("Verspätung: {delay} Minuten");
    match comment {
        Some(existing) if !existing.is_empty() => Some(format!("{existing} | {note}")),
        _ => Some(note),
    }
}

/// Resolves the comment to store for one entry: parse the arrival, measure
/// the delay, annotate.
pub fn resolve_comment(entry: &AttendanceEntry) -> Result<Option<String>> {
    let arrival = parse_arrival(entry.arrival_time.as_deref())?;
    Ok(annotate_comment(entry.comment.as_deref(), delay_minutes(arrival)))
}
