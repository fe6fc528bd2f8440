//! Automatic scheduler for prioritized tasks.
//!
//! This module places tasks into preferred daily time blocks:
//! - Maps each task's Eisenhower quadrant to a block tier
//! - Walks days x blocks greedily and takes the first conflict-free slot
//! - Schedules whole task lists with a buffer between placements
//!
//! The scheduler is a pure function of its inputs. It never writes to a
//! calendar; see [`crate::calendar`] for the write-back seam.

pub mod api;
pub mod batch;
pub mod catalog;
pub mod conflict;
pub mod policy;
pub mod search;

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub use api::{BatchRequest, BatchResponse, ScheduleEntry, SlotRequest};
pub use batch::{BatchPlan, BatchSummary, OutcomeStatus, TaskOutcome};
pub use catalog::{tier_for_quadrant, TimeBlock, TimeBlockCatalog};
pub use conflict::{is_free, normalize_events, BusyInterval, EventTime, RawCalendarEvent};
pub use policy::{DurationDefaults, SearchParameters};
pub use search::SlotSuggestion;

use crate::task::Task;

/// Scheduler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Tasks scheduled per batch run
    #[serde(default = "default_batch_capacity")]
    pub batch_capacity: usize,
    /// Gap kept around each batch placement (minutes)
    #[serde(default = "default_buffer_minutes")]
    pub buffer_minutes: i64,
    /// Horizon for urgent and high tiers (days)
    #[serde(default = "default_extended_horizon")]
    pub extended_horizon_days: u32,
    /// Horizon for medium and low tiers (days)
    #[serde(default = "default_standard_horizon")]
    pub standard_horizon_days: u32,
    /// Ranked suggestions returned for a single task
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
    #[serde(default)]
    pub durations: DurationDefaults,
}

fn default_batch_capacity() -> usize {
    8
}
fn default_buffer_minutes() -> i64 {
    15
}
fn default_extended_horizon() -> u32 {
    14
}
fn default_standard_horizon() -> u32 {
    7
}
fn default_suggestion_limit() -> usize {
    3
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            batch_capacity: default_batch_capacity(),
            buffer_minutes: default_buffer_minutes(),
            extended_horizon_days: default_extended_horizon(),
            standard_horizon_days: default_standard_horizon(),
            suggestion_limit: default_suggestion_limit(),
            durations: DurationDefaults::default(),
        }
    }
}

/// Automatic scheduler over a shared, immutable block catalog.
#[derive(Debug, Clone)]
pub struct AutoScheduler {
    catalog: Arc<TimeBlockCatalog>,
    config: SchedulerConfig,
}

impl AutoScheduler {
    /// Create a new scheduler with the default catalog and config
    pub fn new() -> Self {
        Self::with_catalog(Arc::new(TimeBlockCatalog::default()), SchedulerConfig::default())
    }

    /// Create with custom config
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self::with_catalog(Arc::new(TimeBlockCatalog::default()), config)
    }

    /// Create over a catalog shared with other schedulers
    pub fn with_catalog(catalog: Arc<TimeBlockCatalog>, config: SchedulerConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &TimeBlockCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Search parameters for a task.
    pub fn plan_for(&self, task: &Task, now: NaiveDateTime) -> SearchParameters {
        policy::plan_for(task, now, &self.config)
    }
}

impl Default for AutoScheduler {
    fn default() -> Self {
        Self::new()
    }
}
