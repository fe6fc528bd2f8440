use blocksmith_core::time::parse_naive;
use blocksmith_core::{advice, classify, Priority};
use clap::Args;
use serde_json::json;

use super::{print_json, resolve_now, CommandResult};

#[derive(Args)]
pub struct ClassifyArgs {
    /// Priority: low, medium, high or urgent
    #[arg(long)]
    priority: String,
    /// Due date (ISO-8601)
    #[arg(long)]
    due: Option<String>,
    /// Reference time (ISO-8601, default: now)
    #[arg(long)]
    now: Option<String>,
}

pub fn run(args: ClassifyArgs) -> CommandResult {
    let priority: Priority = args.priority.parse()?;
    let due = args.due.as_deref().map(parse_naive).transpose()?;
    let now = resolve_now(args.now.as_deref())?;

    let quadrant = classify(priority, due, now);
    print_json(&json!({
        "priority": priority,
        "quadrant": quadrant,
        "advice": advice(quadrant),
    }))
}
