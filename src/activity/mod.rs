//! Learning activity aggregation
//!
//! Turns a flat list of `(date, count)` samples into Sunday-starting week
//! buckets for the calendar heat map, and derives the summary numbers shown
//! under it.
//!
//! Pipeline: samples → stable date sort → week buckets (padded to 7) →
//! intensity levels; statistics are computed over the raw samples.

pub mod bucket;
pub mod intensity;
pub mod stats;

pub use bucket::{bucket_by_week, week_start};
pub use intensity::{color_level, IntensityLevel, LEVEL_COUNT};
pub use stats::{active_day_count, max_daily_count, total_count};
