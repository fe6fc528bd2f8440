//! Request and response shapes exchanged with the HTTP collaborator.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::batch::BatchPlan;
use super::catalog::tier_for_quadrant;
use super::conflict::BusyInterval;
use super::policy;
use super::search::SlotSuggestion;
use super::AutoScheduler;
use crate::error::ValidationError;
use crate::matrix::Quadrant;
use crate::task::Priority;
use crate::time::{parse_day_start, parse_naive};

/// Single-task slot request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRequest {
    pub task_title: String,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub eisenhower_quadrant: Option<Quadrant>,
}

impl SlotRequest {
    /// Tier to search: the quadrant's tier when given, else the priority,
    /// else medium.
    pub fn tier(&self) -> Priority {
        self.eisenhower_quadrant
            .map(tier_for_quadrant)
            .or(self.priority)
            .unwrap_or_default()
    }
}

/// Batch request for one user and day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRequest {
    pub user_id: String,
    /// `YYYY-MM-DD` or a full timestamp.
    pub date: String,
}

impl BatchRequest {
    /// The search start time this request refers to.
    ///
    /// # Errors
    /// Returns an error if `date` is neither a date nor a timestamp.
    pub fn now(&self) -> Result<NaiveDateTime, ValidationError> {
        parse_day_start(&self.date).or_else(|_| parse_naive(&self.date))
    }
}

/// One placed task in a batch response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub task_id: String,
    pub task_title: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub duration_minutes: i64,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResponse {
    pub scheduled_blocks: usize,
    pub schedule: Vec<ScheduleEntry>,
}

impl From<&BatchPlan> for BatchResponse {
    fn from(plan: &BatchPlan) -> Self {
        let schedule: Vec<ScheduleEntry> = plan
            .scheduled()
            .map(|(outcome, slot)| ScheduleEntry {
                task_id: outcome.task_id.clone(),
                task_title: outcome.task_title.clone(),
                start_time: slot.start,
                end_time: slot.end,
                duration_minutes: slot.duration_minutes,
                priority: slot.tier,
            })
            .collect();
        Self {
            scheduled_blocks: schedule.len(),
            schedule,
        }
    }
}

impl AutoScheduler {
    /// Ranked slot suggestions for a single-task request.
    pub fn suggest_for_request(
        &self,
        request: &SlotRequest,
        busy: &[BusyInterval],
        now: NaiveDateTime,
    ) -> Vec<SlotSuggestion> {
        let params = policy::parameters(request.tier(), request.duration_minutes, self.config());
        self.suggest_slots(&params, busy, now, self.config().suggestion_limit)
    }
}
