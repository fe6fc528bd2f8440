//! Turns a task into search parameters.
//!
//! The tier comes from the task's Eisenhower quadrant, not its raw priority:
//! a "delegate" task searches the medium blocks even if it was filed as
//! urgent.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::catalog::tier_for_quadrant;
use super::SchedulerConfig;
use crate::task::{Priority, Task};

/// Default task length per tier, in minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationDefaults {
    #[serde(default = "default_urgent")]
    pub urgent: i64,
    #[serde(default = "default_high")]
    pub high: i64,
    #[serde(default = "default_medium")]
    pub medium: i64,
    #[serde(default = "default_low")]
    pub low: i64,
}

fn default_urgent() -> i64 {
    90
}
fn default_high() -> i64 {
    60
}
fn default_medium() -> i64 {
    45
}
fn default_low() -> i64 {
    30
}

impl Default for DurationDefaults {
    fn default() -> Self {
        Self {
            urgent: default_urgent(),
            high: default_high(),
            medium: default_medium(),
            low: default_low(),
        }
    }
}

impl DurationDefaults {
    pub fn for_tier(&self, tier: Priority) -> i64 {
        match tier {
            Priority::Urgent => self.urgent,
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }
}

/// Inputs to a single slot search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParameters {
    pub tier: Priority,
    pub duration_minutes: i64,
    pub horizon_days: u32,
}

/// Days scanned for a tier: the extended horizon for urgent and high.
pub fn horizon_for(tier: Priority, config: &SchedulerConfig) -> u32 {
    match tier {
        Priority::Urgent | Priority::High => config.extended_horizon_days,
        Priority::Medium | Priority::Low => config.standard_horizon_days,
    }
}

/// Parameters for an explicit tier and optional duration.
pub fn parameters(tier: Priority, duration_minutes: Option<i64>, config: &SchedulerConfig) -> SearchParameters {
    SearchParameters {
        tier,
        duration_minutes: duration_minutes
            .filter(|m| *m > 0)
            .unwrap_or_else(|| config.durations.for_tier(tier)),
        horizon_days: horizon_for(tier, config),
    }
}

/// Search parameters for `task`, classifying it at `now` if needed.
pub fn plan_for(task: &Task, now: NaiveDateTime, config: &SchedulerConfig) -> SearchParameters {
    let tier = tier_for_quadrant(task.quadrant_at(now));
    parameters(tier, task.positive_estimate(), config)
}
