//! Task -> calendar event bookkeeping.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Which tasks already own a calendar event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingLedger {
    bookings: HashMap<String, String>,
}

impl BookingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_booked(&self, task_id: &str) -> bool {
        self.bookings.contains_key(task_id)
    }

    pub fn event_for(&self, task_id: &str) -> Option<&str> {
        self.bookings.get(task_id).map(String::as_str)
    }

    /// Remember that `task_id` is booked as `event_id`. The first booking wins.
    pub fn record(&mut self, task_id: &str, event_id: &str) {
        self.bookings
            .entry(task_id.to_string())
            .or_insert_with(|| event_id.to_string());
    }

    /// Tasks that still need a slot, in their original order.
    pub fn filter_unbooked(&self, tasks: &[Task]) -> Vec<Task> {
        tasks
            .iter()
            .filter(|t| !self.is_booked(&t.id))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}
