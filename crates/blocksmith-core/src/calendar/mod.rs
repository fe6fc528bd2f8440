//! Calendar collaborator seam.
//!
//! The scheduler never talks to a calendar itself. This module defines the two
//! sides a calendar integration implements (reading busy events, writing
//! bookings) and the commit loop that writes a batch plan back with at most one
//! event per task.

mod ledger;
mod memory;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::scheduler::{normalize_events, BatchPlan, BusyInterval, RawCalendarEvent, SlotSuggestion};

pub use ledger::BookingLedger;
pub use memory::InMemoryCalendar;

/// Read side of a calendar integration.
pub trait CalendarSource {
    /// Events overlapping `[time_min, time_max)`.
    fn list_events(&self, time_min: NaiveDateTime, time_max: NaiveDateTime) -> Result<Vec<RawCalendarEvent>>;
}

/// Write side of a calendar integration.
pub trait CalendarSink {
    /// Create an event for `booking` and return its calendar id.
    fn create_event(&mut self, booking: &TaskBooking) -> Result<String>;
}

/// What the sink needs to write one scheduled task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskBooking {
    pub task_id: String,
    pub task_title: String,
    pub slot: SlotSuggestion,
}

/// Result of writing one task back to the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum CommitOutcome {
    Created { task_id: String, event_id: String },
    AlreadyBooked { task_id: String, event_id: String },
    Failed { task_id: String, error: String },
}

impl CommitOutcome {
    pub fn task_id(&self) -> &str {
        match self {
            CommitOutcome::Created { task_id, .. }
            | CommitOutcome::AlreadyBooked { task_id, .. }
            | CommitOutcome::Failed { task_id, .. } => task_id,
        }
    }
}

/// Fetch and normalize the busy intervals for the next `horizon_days`.
///
/// # Errors
/// Propagates the source's error; malformed entries are dropped, not errors.
pub fn busy_snapshot(
    source: &dyn CalendarSource,
    now: NaiveDateTime,
    horizon_days: u32,
) -> Result<Vec<BusyInterval>> {
    // Day 0 blocks may start before `now`, so read from midnight.
    let time_min = now.date().and_time(chrono::NaiveTime::default());
    let time_max = time_min + Duration::days(i64::from(horizon_days) + 1);
    let events = source.list_events(time_min, time_max)?;
    Ok(normalize_events(&events))
}

/// Write every scheduled task of `plan` to `sink`.
///
/// Tasks already in the ledger are not written again. A failed write is
/// reported for that task and the loop moves on.
pub fn commit_plan(plan: &BatchPlan, sink: &mut dyn CalendarSink, ledger: &mut BookingLedger) -> Vec<CommitOutcome> {
    plan.scheduled()
        .map(|(outcome, slot)| {
            let task_id = outcome.task_id.clone();
            if let Some(event_id) = ledger.event_for(&task_id) {
                return CommitOutcome::AlreadyBooked {
                    task_id,
                    event_id: event_id.to_string(),
                };
            }

            let booking = TaskBooking {
                task_id: task_id.clone(),
                task_title: outcome.task_title.clone(),
                slot: slot.clone(),
            };
            match sink.create_event(&booking) {
                Ok(event_id) => {
                    ledger.record(&task_id, &event_id);
                    CommitOutcome::Created { task_id, event_id }
                }
                Err(err) => {
                    tracing::warn!(%task_id, %err, "calendar write failed");
                    CommitOutcome::Failed {
                        task_id,
                        error: err.to_string(),
                    }
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Quadrant;
    use crate::scheduler::AutoScheduler;
    use crate::task::{Priority, Task};
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn plan(ids: &[&str]) -> BatchPlan {
        let tasks: Vec<Task> = ids
            .iter()
            .map(|id| Task::new(*id, format!("Task {id}"), Priority::High).with_quadrant(Quadrant::Do))
            .collect();
        AutoScheduler::new().schedule_batch(&tasks, &[], at(1, 0))
    }

    #[test]
    fn commit_writes_each_task_once() {
        let mut calendar = InMemoryCalendar::new();
        let mut ledger = BookingLedger::new();
        let plan = plan(&["a", "b"]);

        let first = commit_plan(&plan, &mut calendar, &mut ledger);
        assert!(first.iter().all(|o| matches!(o, CommitOutcome::Created { .. })));

        // Retrying the same plan must not create duplicates.
        let second = commit_plan(&plan, &mut calendar, &mut ledger);
        assert!(second.iter().all(|o| matches!(o, CommitOutcome::AlreadyBooked { .. })));
        assert_eq!(calendar.len(), 2);
    }

    #[test]
    fn failed_write_does_not_abort_the_rest() {
        let mut calendar = InMemoryCalendar::new().failing_for("a");
        let mut ledger = BookingLedger::new();
        let outcomes = commit_plan(&plan(&["a", "b"]), &mut calendar, &mut ledger);

        assert!(matches!(outcomes[0], CommitOutcome::Failed { .. }));
        assert!(matches!(outcomes[1], CommitOutcome::Created { .. }));
        assert!(!ledger.is_booked("a"));
        assert!(ledger.is_booked("b"));
    }

    #[test]
    fn committed_bookings_block_later_searches() {
        let mut calendar = InMemoryCalendar::new();
        let mut ledger = BookingLedger::new();
        commit_plan(&plan(&["a"]), &mut calendar, &mut ledger);

        let busy = busy_snapshot(&calendar, at(1, 0), 14).unwrap();
        assert_eq!(busy.len(), 1);
        let slot = AutoScheduler::new()
            .find_slot(60, Priority::Urgent, &busy, at(1, 0))
            .unwrap();
        assert_ne!(slot.start, busy[0].start);
    }

    #[test]
    fn snapshot_window_covers_the_horizon() {
        let calendar = InMemoryCalendar::from_events(vec![
            RawCalendarEvent::timed("2024-01-01T07:00:00Z", "2024-01-01T08:00:00Z"),
            RawCalendarEvent::timed("2024-01-08T09:00:00Z", "2024-01-08T10:00:00Z"),
            RawCalendarEvent::timed("2024-02-01T09:00:00Z", "2024-02-01T10:00:00Z"),
        ]);
        let busy = busy_snapshot(&calendar, at(1, 12), 7).unwrap();
        assert_eq!(busy.len(), 2);
    }
}
