//! # Blocksmith Core Library
//!
//! This library classifies tasks with the Eisenhower Matrix and places them
//! into preferred daily time blocks that do not collide with existing calendar
//! events. The CLI binary and any HTTP front-end are thin layers over it.
//!
//! ## Architecture
//!
//! - **Matrix**: urgency/importance classification into do, decide,
//!   delegate and delete
//! - **Scheduler**: block catalog, conflict detection, greedy slot search and
//!   batch placement
//! - **Calendar**: read/write traits for calendar collaborators and an
//!   idempotent commit loop
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`AutoScheduler`]: slot search and batch scheduling
//! - [`TimeBlockCatalog`]: immutable table of preferred blocks per tier
//! - [`classify`]: Eisenhower quadrant for a priority and due date
//! - [`Config`]: application configuration management

pub mod calendar;
pub mod error;
pub mod matrix;
pub mod scheduler;
pub mod storage;
pub mod task;
pub mod time;

pub use calendar::{
    busy_snapshot, commit_plan, BookingLedger, CalendarSink, CalendarSource, CommitOutcome, InMemoryCalendar,
    TaskBooking,
};
pub use error::{ConfigError, CoreError, SchedulingError, ValidationError};
pub use matrix::{advice, classify, Quadrant, QuadrantAction, QuadrantAdvice};
pub use scheduler::{
    is_free, normalize_events, tier_for_quadrant, AutoScheduler, BatchPlan, BatchRequest, BatchResponse,
    BatchSummary, BusyInterval, OutcomeStatus, RawCalendarEvent, ScheduleEntry, SchedulerConfig, SearchParameters,
    SlotRequest, SlotSuggestion, TaskOutcome, TimeBlock, TimeBlockCatalog,
};
pub use storage::Config;
pub use task::{Priority, Task};
