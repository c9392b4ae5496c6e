//! Synthetic activity history
//!
//! Generates one sample per calendar day with weekday-heavy counts, for
//! demos and for exercising the heat map without real data. With a seed the
//! output is reproducible.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::ActivitySample;

/// Base activity on Saturdays and Sundays
pub const WEEKEND_BASE_ACTIVITY: f64 = 0.3;

/// Base activity on weekdays
pub const WEEKDAY_BASE_ACTIVITY: f64 = 0.8;

/// Generator settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntheticConfig {
    /// First day, inclusive
    pub start: NaiveDate,
    /// Last day, inclusive
    pub end: NaiveDate,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        let (start, end) = default_window();
        Self {
            start,
            end,
            seed: None,
        }
    }
}

/// The demo window: 2024-06-01 through 2024-12-31
pub fn default_window() -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap_or(NaiveDate::MIN),
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or(NaiveDate::MIN),
    )
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Draw a daily count. Roughly one day in five is idle; the rest fall into
/// bands that scale with the base activity.
fn draw_count<R: Rng>(rng: &mut R, base: f64) -> u32 {
    let band: f64 = rng.gen();
    let jitter: f64 = rng.gen();

    let count = if band < 0.2 {
        0.0
    } else if band < 0.4 {
        (base + jitter).floor()
    } else if band < 0.7 {
        (base * 2.0 + jitter * 2.0).floor()
    } else if band < 0.9 {
        (base * 3.0 + jitter * 3.0).floor()
    } else {
        (base * 4.0 + jitter * 4.0).floor()
    };

    count.max(0.0) as u32
}

/// Generate one sample per day in `config.start..=config.end`.
///
/// An inverted window yields no samples.
pub fn generate_activity(config: &SyntheticConfig) -> Vec<ActivitySample> {
    let mut rng = match config.seed {
        Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
        None => Mcg128Xsl64::from_entropy(),
    };

    let samples: Vec<ActivitySample> = config
        .start
        .iter_days()
        .take_while(|d| *d <= config.end)
        .map(|date| {
            let base = if is_weekend(date) {
                WEEKEND_BASE_ACTIVITY
            } else {
                WEEKDAY_BASE_ACTIVITY
            };
            ActivitySample::new(date, draw_count(&mut rng, base))
        })
        .collect();

    debug!(
        start = %config.start,
        end = %config.end,
        days = samples.len(),
        "generated synthetic activity"
    );

    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::bucket_by_week;
    use pretty_assertions::assert_eq;

    fn seeded(seed: u64) -> SyntheticConfig {
        SyntheticConfig {
            seed: Some(seed),
            ..SyntheticConfig::default()
        }
    }

    #[test]
    fn test_one_sample_per_day() {
        let samples = generate_activity(&seeded(7));
        assert_eq!(samples.len(), 214);
        assert_eq!(samples[0].date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(
            samples.last().unwrap().date,
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_deterministic_with_seed() {
        assert_eq!(generate_activity(&seeded(42)), generate_activity(&seeded(42)));
    }

    #[test]
    fn test_counts_stay_in_range() {
        // weekday max: floor(0.8 * 4 + 4) = 7, weekend max: floor(0.3 * 4 + 4) = 5
        for sample in generate_activity(&seeded(3)) {
            let cap = if is_weekend(sample.date) { 5 } else { 7 };
            assert!(sample.count <= cap, "{:?}", sample);
        }
    }

    #[test]
    fn test_inverted_window_is_empty() {
        let config = SyntheticConfig {
            start: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            seed: Some(1),
        };
        assert!(generate_activity(&config).is_empty());
    }

    #[test]
    fn test_generated_history_buckets_cleanly() {
        let samples = generate_activity(&seeded(11));
        let weeks = bucket_by_week(&samples);
        let real: usize = weeks.iter().map(|w| w.real_days().count()).sum();
        assert_eq!(real, samples.len());
    }
}
