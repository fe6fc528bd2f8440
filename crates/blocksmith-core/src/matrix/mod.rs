//! Eisenhower Matrix classification.
//!
//! A task is urgent when it is due within two days (inclusive, overdue tasks
//! included) and important when its priority is high or urgent.

mod playbook;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::SchedulingError;
use crate::task::Priority;

pub use playbook::{advice, QuadrantAction, QuadrantAdvice};

/// Days-until-due at or below which a task is urgent.
pub const URGENCY_WINDOW_DAYS: i64 = 2;

const SECONDS_PER_DAY: i64 = 86_400;

/// Eisenhower quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quadrant {
    /// Urgent and important
    Do,
    /// Important, not urgent
    Decide,
    /// Urgent, not important
    Delegate,
    /// Neither
    Delete,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::Do,
        Quadrant::Decide,
        Quadrant::Delegate,
        Quadrant::Delete,
    ];

    /// Batch ordering rank; lower is scheduled first.
    pub fn rank(self) -> u8 {
        match self {
            Quadrant::Do => 0,
            Quadrant::Decide => 1,
            Quadrant::Delegate => 2,
            Quadrant::Delete => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Quadrant::Do => "do",
            Quadrant::Decide => "decide",
            Quadrant::Delegate => "delegate",
            Quadrant::Delete => "delete",
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quadrant {
    type Err = SchedulingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "do" => Ok(Quadrant::Do),
            "decide" => Ok(Quadrant::Decide),
            "delegate" => Ok(Quadrant::Delegate),
            "delete" => Ok(Quadrant::Delete),
            other => Err(SchedulingError::UnrecognizedTier(other.to_string())),
        }
    }
}

/// Whole days until `due`, rounded towards negative infinity.
pub fn days_until_due(due: NaiveDateTime, now: NaiveDateTime) -> i64 {
    (due - now).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Classify a task into its Eisenhower quadrant.
pub fn classify(priority: Priority, due_date: Option<NaiveDateTime>, now: NaiveDateTime) -> Quadrant {
    let is_important = priority.is_important();

    let Some(due) = due_date else {
        return if is_important {
            Quadrant::Decide
        } else {
            Quadrant::Delete
        };
    };

    let is_urgent = days_until_due(due, now) <= URGENCY_WINDOW_DAYS;

    match (is_urgent, is_important) {
        (true, true) => Quadrant::Do,
        (false, true) => Quadrant::Decide,
        (true, false) => Quadrant::Delegate,
        (false, false) => Quadrant::Delete,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn no_due_date_splits_on_importance() {
        assert_eq!(classify(Priority::Urgent, None, now()), Quadrant::Decide);
        assert_eq!(classify(Priority::High, None, now()), Quadrant::Decide);
        assert_eq!(classify(Priority::Medium, None, now()), Quadrant::Delete);
        assert_eq!(classify(Priority::Low, None, now()), Quadrant::Delete);
    }

    #[test]
    fn two_day_boundary_is_inclusive() {
        let due = now() + Duration::days(2);
        assert_eq!(classify(Priority::Urgent, Some(due), now()), Quadrant::Do);
        assert_eq!(classify(Priority::Low, Some(due), now()), Quadrant::Delegate);
    }

    #[test]
    fn three_days_out_is_not_urgent() {
        let due = now() + Duration::days(3);
        assert_eq!(classify(Priority::Urgent, Some(due), now()), Quadrant::Decide);
        assert_eq!(classify(Priority::Low, Some(due), now()), Quadrant::Delete);
    }

    #[test]
    fn partial_days_are_floored() {
        // 2 days 23 hours still counts as 2 whole days.
        let due = now() + Duration::days(2) + Duration::hours(23);
        assert_eq!(days_until_due(due, now()), 2);
        assert_eq!(classify(Priority::High, Some(due), now()), Quadrant::Do);
    }

    #[test]
    fn overdue_tasks_are_urgent() {
        let due = now() - Duration::seconds(1);
        assert_eq!(days_until_due(due, now()), -1);
        assert_eq!(classify(Priority::High, Some(due), now()), Quadrant::Do);
        assert_eq!(classify(Priority::Medium, Some(due), now()), Quadrant::Delegate);

        let long_overdue = now() - Duration::days(400);
        assert_eq!(classify(Priority::Low, Some(long_overdue), now()), Quadrant::Delegate);
    }

    #[test]
    fn quadrant_rank_orders_do_first() {
        let mut qs = vec![Quadrant::Delete, Quadrant::Do, Quadrant::Delegate, Quadrant::Decide];
        qs.sort_by_key(|q| q.rank());
        assert_eq!(qs, Quadrant::ALL.to_vec());
    }

    #[test]
    fn quadrant_parse_rejects_unknown() {
        assert_eq!("Decide".parse::<Quadrant>().unwrap(), Quadrant::Decide);
        assert!("later".parse::<Quadrant>().is_err());
    }
}
