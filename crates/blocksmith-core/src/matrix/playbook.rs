//! Recommended handling per quadrant.

use serde::{Deserialize, Serialize};

use super::Quadrant;

/// What the user should do with a task in a given quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuadrantAction {
    ScheduleNow,
    ScheduleFocused,
    Delegate,
    Eliminate,
}

impl QuadrantAction {
    /// Whether this action places the task on the calendar.
    pub fn is_scheduling(self) -> bool {
        matches!(self, QuadrantAction::ScheduleNow | QuadrantAction::ScheduleFocused)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuadrantAdvice {
    pub quadrant: Quadrant,
    pub action: QuadrantAction,
    pub reasoning: &'static str,
    pub options: Vec<&'static str>,
}

pub fn advice(quadrant: Quadrant) -> QuadrantAdvice {
    let (action, reasoning, options) = match quadrant {
        Quadrant::Do => (
            QuadrantAction::ScheduleNow,
            "Urgent & Important - Schedule immediately",
            vec![],
        ),
        Quadrant::Decide => (
            QuadrantAction::ScheduleFocused,
            "Important but not urgent - Schedule in peak focus time",
            vec![],
        ),
        Quadrant::Delegate => (
            QuadrantAction::Delegate,
            "Urgent but not important - Consider delegating",
            vec![
                "Assign to team member with available capacity",
                "Automate if possible",
                "Simplify the requirements",
            ],
        ),
        Quadrant::Delete => (
            QuadrantAction::Eliminate,
            "Neither urgent nor important - Consider eliminating",
            vec![
                "Delete if not necessary",
                "Defer to later date",
                "Batch with similar low-priority tasks",
            ],
        ),
    };

    QuadrantAdvice {
        quadrant,
        action,
        reasoning,
        options,
    }
}
