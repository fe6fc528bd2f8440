//! Property and scenario tests for the slot search and batch scheduler.

use blocksmith_core::{
    is_free, AutoScheduler, BusyInterval, Priority, Quadrant, SchedulerConfig, Task,
};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use proptest::prelude::*;

fn day0() -> NaiveDateTime {
    // Monday
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn tier_strategy() -> impl Strategy<Value = Priority> {
    prop_oneof![
        Just(Priority::Urgent),
        Just(Priority::High),
        Just(Priority::Medium),
        Just(Priority::Low),
    ]
}

/// Busy intervals scattered over the first three weeks, on 15-minute marks.
fn busy_strategy() -> impl Strategy<Value = Vec<BusyInterval>> {
    prop::collection::vec((0i64..21 * 96, 1i64..16), 0..40).prop_map(|raw| {
        raw.into_iter()
            .map(|(quarter, len)| {
                let start = day0() + Duration::minutes(quarter * 15);
                BusyInterval::new(start, start + Duration::minutes(len * 15)).unwrap()
            })
            .collect()
    })
}

fn now_strategy() -> impl Strategy<Value = NaiveDateTime> {
    (0i64..14 * 24).prop_map(|hours| day0() + Duration::hours(hours))
}

proptest! {
    #[test]
    fn find_slot_is_deterministic(
        tier in tier_strategy(),
        duration in 15i64..180,
        busy in busy_strategy(),
        now in now_strategy(),
    ) {
        let scheduler = AutoScheduler::new();
        let first = scheduler.find_slot(duration, tier, &busy, now);
        let second = scheduler.find_slot(duration, tier, &busy, now);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn found_slots_are_free_and_in_catalog(
        tier in tier_strategy(),
        duration in 15i64..180,
        busy in busy_strategy(),
        now in now_strategy(),
    ) {
        let scheduler = AutoScheduler::new();
        if let Ok(slot) = scheduler.find_slot(duration, tier, &busy, now) {
            prop_assert!(is_free(slot.start, slot.end, &busy));
            prop_assert_eq!((slot.end - slot.start).num_minutes(), duration);
            prop_assert!(scheduler
                .catalog()
                .blocks_for(tier)
                .iter()
                .any(|b| b.name == slot.block_name && b.score == slot.score));
            prop_assert!(slot.start.date() >= now.date());
        }
    }

    #[test]
    fn weekends_only_for_urgent(
        tier in tier_strategy(),
        busy in busy_strategy(),
        now in now_strategy(),
    ) {
        let scheduler = AutoScheduler::new();
        if let Ok(slot) = scheduler.find_slot(60, tier, &busy, now) {
            let weekend = matches!(slot.start.weekday(), Weekday::Sat | Weekday::Sun);
            prop_assert!(!weekend || tier == Priority::Urgent);
        }
    }

    #[test]
    fn batch_of_do_tasks_never_overlaps_with_buffer(
        durations in prop::collection::vec(15i64..150, 10),
        busy in busy_strategy(),
        now in now_strategy(),
    ) {
        let config = SchedulerConfig { batch_capacity: 10, ..SchedulerConfig::default() };
        let scheduler = AutoScheduler::with_config(config);
        let tasks: Vec<Task> = durations
            .iter()
            .enumerate()
            .map(|(i, minutes)| {
                Task::new(format!("t{i}"), format!("Task {i}"), Priority::Urgent)
                    .with_quadrant(Quadrant::Do)
                    .with_estimate(*minutes)
            })
            .collect();

        let plan = scheduler.schedule_batch(&tasks, &busy, now);
        let buffer = Duration::minutes(15);
        let padded: Vec<(NaiveDateTime, NaiveDateTime)> = plan
            .scheduled()
            .map(|(_, slot)| (slot.start, slot.end + buffer))
            .collect();

        for (i, a) in padded.iter().enumerate() {
            for b in padded.iter().skip(i + 1) {
                prop_assert!(!(a.0 < b.1 && a.1 > b.0), "{:?} overlaps {:?}", a, b);
            }
        }
        for (_, slot) in plan.scheduled() {
            prop_assert!(is_free(slot.start, slot.end, &busy));
        }
    }
}

#[test]
fn urgent_scenario_on_empty_calendar() {
    let now = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();
    let slot = AutoScheduler::new()
        .find_slot(60, Priority::Urgent, &[], now)
        .unwrap();
    assert_eq!(slot.block_name, "Peak Focus (9-11 AM)");
    assert_eq!(slot.start.date(), now.date());
}

#[test]
fn high_scenario_skips_morning_meeting() {
    let busy = [BusyInterval::new(day0() + Duration::hours(9), day0() + Duration::hours(11)).unwrap()];
    let slot = AutoScheduler::new()
        .find_slot(60, Priority::High, &busy, day0())
        .unwrap();
    assert_eq!(slot.block_name, "Morning Deep Work (8-9 AM)");
    assert_eq!(slot.start, day0() + Duration::hours(8));
}

#[test]
fn medium_scan_from_saturday_lands_on_monday() {
    let saturday = day0() + Duration::days(5);
    assert_eq!(saturday.weekday(), Weekday::Sat);
    let slot = AutoScheduler::new()
        .find_slot(45, Priority::Medium, &[], saturday)
        .unwrap();
    assert_eq!(slot.start.weekday(), Weekday::Mon);
}

#[test]
fn ten_do_tasks_with_default_capacity_stop_at_eight() {
    let tasks: Vec<Task> = (0..10)
        .map(|i| Task::new(format!("t{i}"), "Task", Priority::High).with_quadrant(Quadrant::Do))
        .collect();
    let summary = AutoScheduler::new().schedule_batch(&tasks, &[], day0()).summary();
    assert_eq!(summary.total_scheduled, 8);
    assert_eq!(summary.over_capacity, 2);
}
