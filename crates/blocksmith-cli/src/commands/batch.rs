use std::path::PathBuf;

use blocksmith_core::time::parse_day_start;
use blocksmith_core::{
    busy_snapshot, commit_plan, BatchResponse, BookingLedger, InMemoryCalendar, Task,
};
use clap::Args;
use serde_json::json;

use super::{load_scheduler, print_json, read_events, read_json, resolve_now, CommandResult};

#[derive(Args)]
pub struct BatchArgs {
    /// JSON file with the task list
    #[arg(long)]
    tasks: PathBuf,
    /// JSON file with existing calendar events
    #[arg(long)]
    events: Option<PathBuf>,
    /// Day to schedule from (YYYY-MM-DD)
    #[arg(long, conflicts_with = "now")]
    date: Option<String>,
    /// Reference time (ISO-8601, default: now)
    #[arg(long)]
    now: Option<String>,
    /// Override the per-run task cap
    #[arg(long)]
    capacity: Option<usize>,
    /// Write scheduled tasks back into the events file
    #[arg(long, requires = "events")]
    commit: bool,
    /// JSON file mapping task ids to event ids; booked tasks are skipped
    #[arg(long)]
    ledger: Option<PathBuf>,
}

pub fn run(args: BatchArgs) -> CommandResult {
    let now = match args.date.as_deref() {
        Some(date) => parse_day_start(date)?,
        None => resolve_now(args.now.as_deref())?,
    };

    let mut ledger: BookingLedger = match args.ledger.as_deref() {
        Some(path) if path.exists() => read_json(path)?,
        _ => BookingLedger::new(),
    };
    let tasks: Vec<Task> = read_json(&args.tasks)?;
    let tasks = ledger.filter_unbooked(&tasks);

    let mut calendar = InMemoryCalendar::from_events(read_events(args.events.as_deref())?);

    let scheduler = load_scheduler(|config| {
        if let Some(capacity) = args.capacity {
            config.batch_capacity = capacity;
        }
    })?;

    let busy = busy_snapshot(&calendar, now, scheduler.config().extended_horizon_days)?;
    let plan = scheduler.schedule_batch(&tasks, &busy, now);

    let commits = if args.commit {
        let commits = commit_plan(&plan, &mut calendar, &mut ledger);
        if let Some(path) = args.events.as_deref() {
            std::fs::write(path, serde_json::to_string_pretty(calendar.events())?)?;
        }
        if let Some(path) = args.ledger.as_deref() {
            std::fs::write(path, serde_json::to_string_pretty(&ledger)?)?;
        }
        Some(commits)
    } else {
        None
    };

    print_json(&json!({
        "response": BatchResponse::from(&plan),
        "summary": plan.summary(),
        "outcomes": plan.outcomes,
        "commits": commits,
    }))
}
