//! Summary statistics over raw activity samples
//!
//! These reduce the raw sample set, not the padded week buckets, so
//! padding never skews the numbers.

use tracing::debug;

use crate::error::BoardError;
use crate::types::{ActivitySample, ActivitySummary};

/// Days with at least one recorded activity
pub fn active_day_count(samples: &[ActivitySample]) -> usize {
    samples.iter().filter(|s| s.count > 0).count()
}

/// Highest single-day count.
///
/// Fails on an empty sample set so "no data" is never confused with
/// "no activity".
pub fn max_daily_count(samples: &[ActivitySample]) -> Result<u32, BoardError> {
    samples
        .iter()
        .map(|s| s.count)
        .max()
        .ok_or_else(|| BoardError::EmptyInput("max daily count needs at least one sample".into()))
}

/// Sum of all counts
pub fn total_count(samples: &[ActivitySample]) -> u64 {
    samples.iter().map(|s| u64::from(s.count)).sum()
}

impl ActivitySummary {
    /// Compute all three statistics at once.
    pub fn from_samples(samples: &[ActivitySample]) -> Result<Self, BoardError> {
        let summary = Self {
            active_day_count: active_day_count(samples),
            max_daily_count: max_daily_count(samples)?,
            total_count: total_count(samples),
        };

        debug!(
            samples = samples.len(),
            active_days = summary.active_day_count,
            max_daily = summary.max_daily_count,
            total = summary.total_count,
            "summarized activity"
        );

        Ok(summary)
    }
}
