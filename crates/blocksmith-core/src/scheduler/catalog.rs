//! Preferred daily time blocks per priority tier.
//!
//! The catalog is immutable once built. Each tier's blocks are kept sorted by
//! descending score; equal scores keep their declaration order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::matrix::Quadrant;
use crate::task::Priority;

/// Tier whose blocks are used when a tier is unknown or has no entry.
pub const FALLBACK_TIER: Priority = Priority::Medium;

/// A named daily window with a static desirability score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub name: String,
    /// Hour of day the block starts at (0-23).
    pub start_hour: u32,
    /// Higher is better.
    pub score: i32,
}

impl TimeBlock {
    pub fn new(name: impl Into<String>, start_hour: u32, score: i32) -> Self {
        Self {
            name: name.into(),
            start_hour,
            score,
        }
    }
}

/// Priority-keyed table of time blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeBlockCatalog {
    tiers: BTreeMap<Priority, Vec<TimeBlock>>,
}

impl TimeBlockCatalog {
    /// Build a catalog from per-tier block lists.
    ///
    /// # Errors
    /// Returns an error if any block starts outside 0-23.
    pub fn new(tiers: BTreeMap<Priority, Vec<TimeBlock>>) -> Result<Self, ValidationError> {
        let mut sorted = BTreeMap::new();
        for (tier, mut blocks) in tiers {
            if let Some(bad) = blocks.iter().find(|b| b.start_hour > 23) {
                return Err(ValidationError::InvalidValue {
                    field: format!("catalog.{tier}.start_hour"),
                    message: format!("block '{}' starts at hour {}", bad.name, bad.start_hour),
                });
            }
            // Stable: equal scores keep declaration order.
            blocks.sort_by(|a, b| b.score.cmp(&a.score));
            sorted.insert(tier, blocks);
        }
        let catalog = Self { tiers: sorted };
        let missing: Vec<Priority> = catalog.fallback_tiers().collect();
        if !missing.is_empty() {
            tracing::warn!(?missing, "tiers missing from catalog will use medium blocks");
        }
        Ok(catalog)
    }

    /// Blocks for `tier`, best first. Falls back to the medium tier's blocks.
    pub fn blocks_for(&self, tier: Priority) -> &[TimeBlock] {
        self.tiers
            .get(&tier)
            .or_else(|| self.tiers.get(&FALLBACK_TIER))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Blocks for an untyped tier name.
    ///
    /// Unrecognized names get the medium tier's blocks instead of an error.
    pub fn blocks_for_name(&self, tier: &str) -> &[TimeBlock] {
        match tier.parse::<Priority>() {
            Ok(tier) => self.blocks_for(tier),
            Err(err) => {
                tracing::warn!(%err, "falling back to medium blocks");
                self.blocks_for(FALLBACK_TIER)
            }
        }
    }

    /// Tiers with no blocks of their own, served from the medium tier.
    pub fn fallback_tiers(&self) -> impl Iterator<Item = Priority> + '_ {
        Priority::ALL
            .into_iter()
            .filter(|tier| !self.tiers.contains_key(tier))
    }

    /// Tiers present in this catalog.
    pub fn tiers(&self) -> impl Iterator<Item = (Priority, &[TimeBlock])> {
        self.tiers.iter().map(|(t, b)| (*t, b.as_slice()))
    }
}

/// Tier whose blocks a task in `quadrant` searches.
pub fn tier_for_quadrant(quadrant: Quadrant) -> Priority {
    match quadrant {
        Quadrant::Do => Priority::Urgent,
        Quadrant::Decide => Priority::High,
        Quadrant::Delegate => Priority::Medium,
        Quadrant::Delete => Priority::Low,
    }
}

impl Default for TimeBlockCatalog {
    fn default() -> Self {
        let mut tiers = BTreeMap::new();
        tiers.insert(
            Priority::Urgent,
            vec![
                TimeBlock::new("Peak Focus (9-11 AM)", 9, 10),
                TimeBlock::new("Post-Lunch Energy (2-4 PM)", 14, 8),
                TimeBlock::new("Morning Start (8-9 AM)", 8, 7),
                TimeBlock::new("Late Morning (11 AM-12 PM)", 11, 6),
                TimeBlock::new("Afternoon (4-5 PM)", 16, 5),
            ],
        );
        tiers.insert(
            Priority::High,
            vec![
                TimeBlock::new("Peak Focus (9-11 AM)", 9, 10),
                TimeBlock::new("Morning Deep Work (8-9 AM)", 8, 9),
                TimeBlock::new("Post-Lunch Energy (2-3 PM)", 14, 8),
            ],
        );
        tiers.insert(
            Priority::Medium,
            vec![
                TimeBlock::new("Late Morning (11 AM-12 PM)", 11, 7),
                TimeBlock::new("Early Afternoon (1-2 PM)", 13, 6),
                TimeBlock::new("Mid Afternoon (3-4 PM)", 15, 6),
            ],
        );
        tiers.insert(
            Priority::Low,
            vec![
                TimeBlock::new("End of Day Wrap-up (4-5 PM)", 16, 4),
                TimeBlock::new("Late Afternoon (5-6 PM)", 17, 3),
            ],
        );
        // Every hour above is within 0-23 and lists are already sorted.
        Self { tiers }
    }
}
