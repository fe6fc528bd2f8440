use std::path::PathBuf;

use blocksmith_core::scheduler::policy::parameters;
use blocksmith_core::{normalize_events, Priority, Quadrant, SlotRequest};
use clap::Args;

use super::{load_scheduler, print_json, read_events, resolve_now, CommandResult};

#[derive(Args)]
pub struct SlotArgs {
    /// Task title
    #[arg(long, default_value = "Untitled task")]
    title: String,
    /// Duration in minutes (default: per tier)
    #[arg(long)]
    duration: Option<i64>,
    /// Priority tier
    #[arg(long)]
    priority: Option<String>,
    /// Eisenhower quadrant; overrides --priority for tier selection
    #[arg(long)]
    quadrant: Option<String>,
    /// JSON file with existing calendar events
    #[arg(long)]
    events: Option<PathBuf>,
    /// Reference time (ISO-8601, default: now)
    #[arg(long)]
    now: Option<String>,
    /// Maximum number of suggestions
    #[arg(long)]
    limit: Option<usize>,
    /// Only print the slot an automatic booking would take
    #[arg(long)]
    first: bool,
}

pub fn run(args: SlotArgs) -> CommandResult {
    let request = SlotRequest {
        task_title: args.title,
        duration_minutes: args.duration,
        priority: args.priority.as_deref().map(str::parse::<Priority>).transpose()?,
        eisenhower_quadrant: args.quadrant.as_deref().map(str::parse::<Quadrant>).transpose()?,
    };
    let now = resolve_now(args.now.as_deref())?;
    let busy = normalize_events(&read_events(args.events.as_deref())?);
    let scheduler = load_scheduler(|_| {})?;
    let params = parameters(request.tier(), request.duration_minutes, scheduler.config());

    if args.first {
        let slot = scheduler.search(&params, &busy, now)?;
        return print_json(&slot);
    }

    let limit = args.limit.unwrap_or(scheduler.config().suggestion_limit);
    let suggestions = scheduler.suggest_slots(&params, &busy, now, limit);
    if suggestions.is_empty() {
        eprintln!("no free slot in search window; try a longer horizon or a shorter duration");
    }
    print_json(&suggestions)
}
