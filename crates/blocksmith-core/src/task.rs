//! Task types consumed by the scheduler.
//!
//! Tasks are owned by the persistence collaborator; the scheduler only reads
//! them. Optional fields are explicit so that "missing" never silently becomes
//! a default somewhere deep in the search.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::SchedulingError;
use crate::matrix::{self, Quadrant};

/// Priority tier of a task, also used to pick a block table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// All tiers, most pressing first.
    pub const ALL: [Priority; 4] = [
        Priority::Urgent,
        Priority::High,
        Priority::Medium,
        Priority::Low,
    ];

    /// High and urgent tasks count as important in the Eisenhower sense.
    pub fn is_important(self) -> bool {
        matches!(self, Priority::High | Priority::Urgent)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = SchedulingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => Err(SchedulingError::UnrecognizedTier(other.to_string())),
        }
    }
}

/// A task as handed to the scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub priority: Priority,
    /// Stored quadrant; derived from priority and due date when absent.
    #[serde(default, alias = "eisenhower_quadrant")]
    pub quadrant: Option<Quadrant>,
    #[serde(default, with = "crate::time::naive_opt")]
    pub due_date: Option<NaiveDateTime>,
    #[serde(default, alias = "estimated_duration")]
    pub estimated_minutes: Option<i64>,
}

impl Task {
    /// Create a task with no due date, quadrant or estimate.
    pub fn new(id: impl Into<String>, title: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            priority,
            quadrant: None,
            due_date: None,
            estimated_minutes: None,
        }
    }

    pub fn with_due_date(mut self, due: NaiveDateTime) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn with_quadrant(mut self, quadrant: Quadrant) -> Self {
        self.quadrant = Some(quadrant);
        self
    }

    pub fn with_estimate(mut self, minutes: i64) -> Self {
        self.estimated_minutes = Some(minutes);
        self
    }

    /// The stored quadrant, or the one classified at `now`.
    pub fn quadrant_at(&self, now: NaiveDateTime) -> Quadrant {
        self.quadrant
            .unwrap_or_else(|| matrix::classify(self.priority, self.due_date, now))
    }

    /// The estimate, if it is usable as a duration.
    pub fn positive_estimate(&self) -> Option<i64> {
        self.estimated_minutes.filter(|m| *m > 0)
    }
}
