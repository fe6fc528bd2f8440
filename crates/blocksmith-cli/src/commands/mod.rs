pub mod batch;
pub mod catalog;
pub mod classify;
pub mod config;
pub mod slot;

use std::path::Path;
use std::sync::Arc;

use blocksmith_core::time::parse_naive;
use blocksmith_core::{AutoScheduler, Config, RawCalendarEvent, SchedulerConfig};
use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// `--now` if given, else the current UTC time.
pub fn resolve_now(now: Option<&str>) -> Result<NaiveDateTime, Box<dyn std::error::Error>> {
    match now {
        Some(value) => Ok(parse_naive(value)?),
        None => Ok(chrono::Utc::now().naive_utc()),
    }
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    Ok(serde_json::from_str(&content)?)
}

/// Calendar events from an optional JSON file; none when absent.
pub fn read_events(path: Option<&Path>) -> Result<Vec<RawCalendarEvent>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => read_json(path),
        None => Ok(Vec::new()),
    }
}

/// Scheduler built from the user's configuration.
pub fn load_scheduler(
    overrides: impl FnOnce(&mut SchedulerConfig),
) -> Result<AutoScheduler, Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let catalog = config.catalog()?;
    let mut scheduler_config = config.scheduler_config();
    overrides(&mut scheduler_config);
    tracing::debug!(
        capacity = scheduler_config.batch_capacity,
        buffer_minutes = scheduler_config.buffer_minutes,
        "scheduler configured"
    );
    Ok(AutoScheduler::with_catalog(Arc::new(catalog), scheduler_config))
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
