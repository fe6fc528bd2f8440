//! In-memory calendar, used by the CLI's JSON files and by tests.

use std::collections::HashSet;

use chrono::NaiveDateTime;

use super::{CalendarSink, CalendarSource, TaskBooking};
use crate::error::{CoreError, Result};
use crate::scheduler::{EventTime, RawCalendarEvent};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A calendar held in a vector of raw events.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCalendar {
    events: Vec<RawCalendarEvent>,
    failing_tasks: HashSet<String>,
}

impl InMemoryCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_events(events: Vec<RawCalendarEvent>) -> Self {
        Self {
            events,
            failing_tasks: HashSet::new(),
        }
    }

    /// Make writes for `task_id` fail.
    pub fn failing_for(mut self, task_id: impl Into<String>) -> Self {
        self.failing_tasks.insert(task_id.into());
        self
    }

    pub fn events(&self) -> &[RawCalendarEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<RawCalendarEvent> {
        self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl CalendarSource for InMemoryCalendar {
    fn list_events(&self, time_min: NaiveDateTime, time_max: NaiveDateTime) -> Result<Vec<RawCalendarEvent>> {
        Ok(self
            .events
            .iter()
            .filter(|event| match event.to_busy_interval() {
                Some(interval) => interval.overlaps(time_min, time_max),
                // Hand all-day and malformed entries through; the scheduler
                // decides what to do with them.
                None => true,
            })
            .cloned()
            .collect())
    }
}

impl CalendarSink for InMemoryCalendar {
    fn create_event(&mut self, booking: &TaskBooking) -> Result<String> {
        if self.failing_tasks.contains(&booking.task_id) {
            return Err(CoreError::calendar(format!(
                "calendar rejected event for task {}",
                booking.task_id
            )));
        }

        let id = uuid::Uuid::new_v4().to_string();
        self.events.push(RawCalendarEvent {
            id: Some(id.clone()),
            summary: Some(booking.task_title.clone()),
            start: Some(EventTime::Text(booking.slot.start.format(TIMESTAMP_FORMAT).to_string())),
            end: Some(EventTime::Text(booking.slot.end.format(TIMESTAMP_FORMAT).to_string())),
        });
        Ok(id)
    }
}
