//! Greedy slot search over days x time blocks.
//!
//! Days are scanned in order starting today; within a day, blocks are tried
//! best score first. The first conflict-free candidate wins. The result is not
//! the best-scored slot across the whole horizon, and must not become one:
//! callers rely on "earliest eligible day first".

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use super::catalog::TimeBlock;
use super::conflict::{is_free, BusyInterval};
use super::policy::{self, SearchParameters};
use super::AutoScheduler;
use crate::error::SchedulingError;
use crate::task::Priority;

/// A free slot inside one of the catalog's blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSuggestion {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration_minutes: i64,
    pub tier: Priority,
    pub block_name: String,
    pub score: i32,
}

impl SlotSuggestion {
    pub fn interval(&self) -> BusyInterval {
        BusyInterval {
            start: self.start,
            end: self.end,
        }
    }
}

fn is_weekend(day: NaiveDate) -> bool {
    matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Candidate placement of `block` on `day`, or `None` if the hour is invalid
/// or the end falls outside the representable range.
fn candidate(
    day: NaiveDate,
    block: &TimeBlock,
    params: &SearchParameters,
) -> Option<SlotSuggestion> {
    let start = day.and_hms_opt(block.start_hour, 0, 0)?;
    let end = start.checked_add_signed(Duration::try_minutes(params.duration_minutes)?)?;
    Some(SlotSuggestion {
        start,
        end,
        duration_minutes: params.duration_minutes,
        tier: params.tier,
        block_name: block.name.clone(),
        score: block.score,
    })
}

/// Days in the horizon this tier may use. Weekends only for urgent work.
fn eligible_days(params: &SearchParameters, now: NaiveDateTime) -> impl Iterator<Item = NaiveDate> {
    let today = now.date();
    let urgent = params.tier == Priority::Urgent;
    (0..i64::from(params.horizon_days))
        .map(move |offset| today + Duration::days(offset))
        .filter(move |day| urgent || !is_weekend(*day))
}

impl AutoScheduler {
    /// Find the first free slot for a task of `duration_minutes` in `tier`.
    ///
    /// # Errors
    /// Returns [`SchedulingError::InvalidDuration`] for a non-positive
    /// duration and [`SchedulingError::NoSlotAvailable`] when no day/block
    /// pair in the horizon is free.
    pub fn find_slot(
        &self,
        duration_minutes: i64,
        tier: Priority,
        busy: &[BusyInterval],
        now: NaiveDateTime,
    ) -> Result<SlotSuggestion, SchedulingError> {
        let params = SearchParameters {
            tier,
            duration_minutes,
            horizon_days: policy::horizon_for(tier, self.config()),
        };
        self.search(&params, busy, now)
    }

    /// Run the greedy search for explicit parameters.
    ///
    /// # Errors
    /// Same as [`AutoScheduler::find_slot`].
    pub fn search(
        &self,
        params: &SearchParameters,
        busy: &[BusyInterval],
        now: NaiveDateTime,
    ) -> Result<SlotSuggestion, SchedulingError> {
        if params.duration_minutes <= 0 {
            return Err(SchedulingError::InvalidDuration {
                minutes: params.duration_minutes,
            });
        }
        let blocks = self.catalog().blocks_for(params.tier);

        for day in eligible_days(params, now) {
            for block in blocks {
                let Some(slot) = candidate(day, block, params) else {
                    continue;
                };
                if is_free(slot.start, slot.end, busy) {
                    tracing::debug!(
                        tier = %params.tier,
                        block = %slot.block_name,
                        start = %slot.start,
                        "found free slot"
                    );
                    return Ok(slot);
                }
            }
        }

        tracing::debug!(
            tier = %params.tier,
            horizon_days = params.horizon_days,
            "no free slot in horizon"
        );
        Err(SchedulingError::NoSlotAvailable {
            horizon_days: params.horizon_days,
        })
    }

    /// Ranked suggestions: for each block of the tier, in score order, its
    /// earliest free occurrence in the horizon. At most `limit` entries.
    pub fn suggest_slots(
        &self,
        params: &SearchParameters,
        busy: &[BusyInterval],
        now: NaiveDateTime,
        limit: usize,
    ) -> Vec<SlotSuggestion> {
        if params.duration_minutes <= 0 {
            return Vec::new();
        }
        self.catalog()
            .blocks_for(params.tier)
            .iter()
            .filter_map(|block| {
                eligible_days(params, now)
                    .filter_map(|day| candidate(day, block, params))
                    .find(|slot| is_free(slot.start, slot.end, busy))
            })
            .take(limit)
            .collect()
    }
}
