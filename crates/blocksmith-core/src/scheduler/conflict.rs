//! Conflict detection against busy calendar intervals.
//!
//! Intervals are half-open: `[start, end)`. Two intervals conflict iff
//! `a.start < b.end && a.end > b.start`, so touching endpoints never conflict.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::parse_naive;

/// An occupied time range the scheduler must avoid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl BusyInterval {
    /// # Errors
    /// Returns an error unless `start < end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::InvalidTimeRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Check if this interval overlaps `[start, end)`.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start < self.end && end > self.start
    }

    /// Widen the interval by `minutes` on both sides.
    ///
    /// Saturates at the representable range instead of overflowing.
    pub fn padded(&self, minutes: i64) -> Self {
        let Some(pad) = Duration::try_minutes(minutes.max(0)) else {
            return Self {
                start: NaiveDateTime::MIN,
                end: NaiveDateTime::MAX,
            };
        };
        Self {
            start: self.start.checked_sub_signed(pad).unwrap_or(NaiveDateTime::MIN),
            end: self.end.checked_add_signed(pad).unwrap_or(NaiveDateTime::MAX),
        }
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// One endpoint of a collaborator event.
///
/// Either a bare ISO string or the `{dateTime, date}` object shape used by
/// calendar providers. A `date` without a time marks an all-day event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventTime {
    Text(String),
    Object {
        #[serde(default, rename = "dateTime")]
        date_time: Option<String>,
        #[serde(default)]
        date: Option<String>,
    },
}

impl EventTime {
    fn raw(&self) -> Option<&str> {
        match self {
            EventTime::Text(s) => Some(s.as_str()),
            EventTime::Object { date_time, date } => date_time.as_deref().or(date.as_deref()),
        }
    }

    /// A calendar date with no time of day.
    fn is_all_day(&self) -> bool {
        match self {
            EventTime::Object {
                date_time: None,
                date: Some(_),
            } => true,
            EventTime::Object { .. } => false,
            EventTime::Text(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").is_ok(),
        }
    }
}

/// A calendar entry as returned by the calendar collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCalendarEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub start: Option<EventTime>,
    #[serde(default)]
    pub end: Option<EventTime>,
}

impl RawCalendarEvent {
    /// Timed event from two ISO strings.
    pub fn timed(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: Some(EventTime::Text(start.into())),
            end: Some(EventTime::Text(end.into())),
            ..Self::default()
        }
    }

    /// Convert into a busy interval.
    ///
    /// Returns `None` for all-day entries and for malformed entries (missing
    /// endpoint, unparseable timestamp, empty or inverted range).
    pub fn to_busy_interval(&self) -> Option<BusyInterval> {
        let start_time = self.start.as_ref()?;
        let start_raw = start_time.raw()?;
        let end_raw = self.end.as_ref()?.raw()?;

        if start_time.is_all_day() {
            tracing::debug!(start = start_raw, "ignoring all-day event");
            return None;
        }

        let start = parse_naive(start_raw).ok()?;
        let end = parse_naive(end_raw).ok()?;
        BusyInterval::new(start, end).ok()
    }
}

/// Normalize collaborator events, dropping anything that cannot block a slot.
pub fn normalize_events(events: &[RawCalendarEvent]) -> Vec<BusyInterval> {
    let busy: Vec<BusyInterval> = events
        .iter()
        .filter_map(RawCalendarEvent::to_busy_interval)
        .collect();
    if busy.len() < events.len() {
        tracing::debug!(
            skipped = events.len() - busy.len(),
            kept = busy.len(),
            "skipped all-day or malformed calendar entries"
        );
    }
    busy
}

/// Whether `[start, end)` is clear of every busy interval.
pub fn is_free(start: NaiveDateTime, end: NaiveDateTime, busy: &[BusyInterval]) -> bool {
    !busy.iter().any(|interval| interval.overlaps(start, end))
}
