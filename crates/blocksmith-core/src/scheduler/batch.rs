//! Batch scheduling of a whole task list.
//!
//! Tasks are ordered do > decide > delegate > delete (stable on ties) and
//! only the first `batch_capacity` are searched. Every placement is added to
//! the working busy set, widened by the buffer on both sides, before the next
//! task is searched, so no two placements from one run sit closer than the
//! buffer.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::conflict::BusyInterval;
use super::search::SlotSuggestion;
use super::AutoScheduler;
use crate::matrix::{self, Quadrant, QuadrantAction};
use crate::task::Task;

pub const NO_FREE_SLOT_REASON: &str = "no free slot in search window";
pub const CAPACITY_REASON: &str = "not scheduled - capacity limit reached";

/// Result for one task of a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Scheduled { slot: SlotSuggestion },
    Unavailable { reason: String },
    CapacityLimitReached { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOutcome {
    pub task_id: String,
    pub task_title: String,
    pub quadrant: Quadrant,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl TaskOutcome {
    pub fn slot(&self) -> Option<&SlotSuggestion> {
        match &self.status {
            OutcomeStatus::Scheduled { slot } => Some(slot),
            _ => None,
        }
    }
}

/// Per-quadrant and total counts for a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub do_tasks: usize,
    pub decide_tasks: usize,
    pub delegate_tasks: usize,
    pub delete_tasks: usize,
    pub total_scheduled: usize,
    pub total_scheduled_minutes: i64,
    pub unavailable: usize,
    pub over_capacity: usize,
    /// Tasks the matrix recommends handing off or dropping.
    pub delegation_candidates: Vec<String>,
    pub elimination_candidates: Vec<String>,
}

/// Ordered outcomes of one batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchPlan {
    pub generated_at: NaiveDateTime,
    pub outcomes: Vec<TaskOutcome>,
}

impl BatchPlan {
    /// Outcomes that received a slot, in placement order.
    pub fn scheduled(&self) -> impl Iterator<Item = (&TaskOutcome, &SlotSuggestion)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.slot().map(|slot| (o, slot)))
    }

    pub fn summary(&self) -> BatchSummary {
        let mut summary = BatchSummary::default();
        for outcome in &self.outcomes {
            match outcome.quadrant {
                Quadrant::Do => summary.do_tasks += 1,
                Quadrant::Decide => summary.decide_tasks += 1,
                Quadrant::Delegate => summary.delegate_tasks += 1,
                Quadrant::Delete => summary.delete_tasks += 1,
            }
            match matrix::advice(outcome.quadrant).action {
                QuadrantAction::Delegate => summary.delegation_candidates.push(outcome.task_id.clone()),
                QuadrantAction::Eliminate => summary.elimination_candidates.push(outcome.task_id.clone()),
                QuadrantAction::ScheduleNow | QuadrantAction::ScheduleFocused => {}
            }
            match &outcome.status {
                OutcomeStatus::Scheduled { slot } => {
                    summary.total_scheduled += 1;
                    summary.total_scheduled_minutes += slot.duration_minutes;
                }
                OutcomeStatus::Unavailable { .. } => summary.unavailable += 1,
                OutcomeStatus::CapacityLimitReached { .. } => summary.over_capacity += 1,
            }
        }
        summary
    }
}

impl AutoScheduler {
    /// Schedule a list of tasks against a busy-interval snapshot.
    ///
    /// Callers are expected to have removed tasks that already own a
    /// calendar event.
    pub fn schedule_batch(&self, tasks: &[Task], busy: &[BusyInterval], now: NaiveDateTime) -> BatchPlan {
        let mut ordered: Vec<(&Task, Quadrant)> = tasks.iter().map(|t| (t, t.quadrant_at(now))).collect();
        // Stable sort keeps input order within a quadrant.
        ordered.sort_by_key(|(_, quadrant)| quadrant.rank());

        let capacity = self.config().batch_capacity;
        let buffer = self.config().buffer_minutes;
        let mut working: Vec<BusyInterval> = busy.to_vec();
        let mut outcomes = Vec::with_capacity(ordered.len());

        for (index, (task, quadrant)) in ordered.into_iter().enumerate() {
            let status = if index >= capacity {
                OutcomeStatus::CapacityLimitReached {
                    reason: CAPACITY_REASON.to_string(),
                }
            } else {
                let params = self.plan_for(task, now);
                match self.search(&params, &working, now) {
                    Ok(slot) => {
                        working.push(slot.interval().padded(buffer));
                        OutcomeStatus::Scheduled { slot }
                    }
                    Err(err) => {
                        tracing::debug!(task_id = %task.id, %err, "task not placed");
                        OutcomeStatus::Unavailable {
                            reason: NO_FREE_SLOT_REASON.to_string(),
                        }
                    }
                }
            };

            outcomes.push(TaskOutcome {
                task_id: task.id.clone(),
                task_title: task.title.clone(),
                quadrant,
                status,
            });
        }

        let plan = BatchPlan {
            generated_at: now,
            outcomes,
        };
        let summary = plan.summary();
        tracing::info!(
            scheduled = summary.total_scheduled,
            unavailable = summary.unavailable,
            over_capacity = summary.over_capacity,
            "batch scheduling finished"
        );
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::SchedulerConfig;
    use crate::task::Priority;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn task(id: &str, quadrant: Quadrant, minutes: i64) -> Task {
        Task::new(id, format!("Task {id}"), Priority::Medium)
            .with_quadrant(quadrant)
            .with_estimate(minutes)
    }

    #[test]
    fn quadrant_order_is_stable() {
        let scheduler = AutoScheduler::new();
        let tasks = vec![
            task("d1", Quadrant::Delete, 30),
            task("a1", Quadrant::Do, 60),
            task("b1", Quadrant::Decide, 60),
            task("a2", Quadrant::Do, 60),
            task("c1", Quadrant::Delegate, 30),
        ];
        let plan = scheduler.schedule_batch(&tasks, &[], at(1, 7, 0));
        let ids: Vec<_> = plan.outcomes.iter().map(|o| o.task_id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a2", "b1", "c1", "d1"]);
    }

    #[test]
    fn placements_do_not_double_book() {
        let scheduler = AutoScheduler::new();
        let tasks = vec![task("a", Quadrant::Do, 60), task("b", Quadrant::Do, 60)];
        let plan = scheduler.schedule_batch(&tasks, &[], at(1, 7, 0));
        let slots: Vec<_> = plan.scheduled().map(|(_, s)| s.start).collect();
        assert_eq!(slots, vec![at(1, 9, 0), at(1, 14, 0)]);
    }

    #[test]
    fn buffer_keeps_neighbours_apart() {
        let scheduler = AutoScheduler::new();
        // 9:00-10:00 then the 8 AM block would end exactly when the first
        // starts; the buffer pushes the third task off the 8 AM block.
        let tasks = vec![
            task("a", Quadrant::Do, 60),
            task("b", Quadrant::Do, 60),
            task("c", Quadrant::Do, 60),
        ];
        let plan = scheduler.schedule_batch(&tasks, &[], at(1, 7, 0));
        let third = plan.outcomes[2].slot().unwrap();
        assert_eq!(third.block_name, "Late Morning (11 AM-12 PM)");
        assert_eq!(third.start, at(1, 11, 0));
    }

    #[test]
    fn tasks_beyond_capacity_are_reported() {
        let config = SchedulerConfig {
            batch_capacity: 2,
            ..SchedulerConfig::default()
        };
        let scheduler = AutoScheduler::with_config(config);
        let tasks = vec![
            task("low", Quadrant::Delete, 30),
            task("a", Quadrant::Do, 30),
            task("b", Quadrant::Decide, 30),
        ];
        let plan = scheduler.schedule_batch(&tasks, &[], at(1, 7, 0));
        assert_eq!(plan.outcomes[2].task_id, "low");
        assert_eq!(
            plan.outcomes[2].status,
            OutcomeStatus::CapacityLimitReached {
                reason: CAPACITY_REASON.to_string()
            }
        );
        let summary = plan.summary();
        assert_eq!(summary.total_scheduled, 2);
        assert_eq!(summary.over_capacity, 1);
    }

    #[test]
    fn one_unplaceable_task_does_not_stop_the_batch() {
        let scheduler = AutoScheduler::new();
        // Busy through Tuesday the 9th: the 7-day low tier finds nothing,
        // the 14-day urgent tier lands on Wednesday the 10th.
        let wall = vec![BusyInterval::new(at(1, 0, 0), at(10, 0, 0)).unwrap()];
        let tasks = vec![task("low", Quadrant::Delete, 30), task("urgent", Quadrant::Do, 30)];
        let plan = scheduler.schedule_batch(&tasks, &wall, at(1, 0, 0));

        assert_eq!(plan.outcomes[0].task_id, "urgent");
        assert_eq!(plan.outcomes[0].slot().unwrap().start, at(10, 9, 0));
        assert_eq!(plan.outcomes[1].task_id, "low");
        assert_eq!(
            plan.outcomes[1].status,
            OutcomeStatus::Unavailable {
                reason: NO_FREE_SLOT_REASON.to_string()
            }
        );
    }

    #[test]
    fn oversized_estimate_is_reported_not_fatal() {
        let scheduler = AutoScheduler::new();
        let tasks = vec![task("huge", Quadrant::Do, i64::MAX), task("ok", Quadrant::Do, 60)];
        let plan = scheduler.schedule_batch(&tasks, &[], at(1, 7, 0));

        assert!(matches!(plan.outcomes[0].status, OutcomeStatus::Unavailable { .. }));
        assert_eq!(plan.outcomes[1].slot().unwrap().start, at(1, 9, 0));
    }

    #[test]
    fn oversized_buffer_blocks_the_rest_without_panicking() {
        let config = SchedulerConfig {
            buffer_minutes: i64::MAX,
            ..SchedulerConfig::default()
        };
        let scheduler = AutoScheduler::with_config(config);
        let tasks = vec![task("a", Quadrant::Do, 60), task("b", Quadrant::Do, 60)];
        let plan = scheduler.schedule_batch(&tasks, &[], at(1, 7, 0));

        assert!(plan.outcomes[0].slot().is_some());
        assert!(matches!(plan.outcomes[1].status, OutcomeStatus::Unavailable { .. }));
    }

    #[test]
    fn placements_resume_after_busy_stretch() {
        let scheduler = AutoScheduler::new();
        let wall = vec![BusyInterval::new(at(1, 0, 0), at(3, 0, 0)).unwrap()];
        let tasks = vec![task("a", Quadrant::Delete, 30), task("b", Quadrant::Delete, 30)];
        let plan = scheduler.schedule_batch(&tasks, &wall, at(1, 0, 0));
        let starts: Vec<_> = plan.scheduled().map(|(_, s)| s.start).collect();
        assert_eq!(starts, vec![at(3, 16, 0), at(3, 17, 0)]);
    }

    #[test]
    fn summary_counts_quadrants_and_minutes() {
        let scheduler = AutoScheduler::new();
        let tasks = vec![
            task("a", Quadrant::Do, 60),
            task("b", Quadrant::Decide, 30),
            task("c", Quadrant::Delegate, 45),
            task("d", Quadrant::Delete, 30),
        ];
        let summary = scheduler.schedule_batch(&tasks, &[], at(1, 7, 0)).summary();
        assert_eq!(summary.do_tasks, 1);
        assert_eq!(summary.decide_tasks, 1);
        assert_eq!(summary.delegate_tasks, 1);
        assert_eq!(summary.delete_tasks, 1);
        assert_eq!(summary.total_scheduled, 4);
        assert_eq!(summary.total_scheduled_minutes, 165);
        assert_eq!(summary.delegation_candidates, vec!["c".to_string()]);
        assert_eq!(summary.elimination_candidates, vec!["d".to_string()]);
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let outcome = TaskOutcome {
            task_id: "t".into(),
            task_title: "T".into(),
            quadrant: Quadrant::Delete,
            status: OutcomeStatus::Unavailable {
                reason: NO_FREE_SLOT_REASON.into(),
            },
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "unavailable");
        assert_eq!(json["quadrant"], "delete");
        assert_eq!(json["reason"], NO_FREE_SLOT_REASON);
    }
}
