//! Week bucketing for the activity heat map
//!
//! Weeks start on Sunday. Dates are plain calendar dates; no timezone
//! conversion happens anywhere in this module.

use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

use crate::types::{ActivitySample, DayCell, WeekBucket, DAYS_PER_WEEK};

/// Sunday on or before `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Group samples into Sunday..Saturday week buckets.
///
/// Samples are stable-sorted by date first, so duplicates keep their input
/// order and the caller's slice is left untouched. A week closes when a
/// Sunday arrives, when the sample belongs to a later calendar week than the
/// open one, or when the open week already holds seven entries. Every bucket
/// is then right-padded to seven slots; padding is always appended, even for
/// a first week that starts mid-week.
pub fn bucket_by_week(samples: &[ActivitySample]) -> Vec<WeekBucket> {
    let mut sorted = samples.to_vec();
    sorted.sort_by_key(|s| s.date);

    let mut weeks: Vec<WeekBucket> = Vec::new();
    let mut current: Vec<DayCell> = Vec::with_capacity(DAYS_PER_WEEK);
    let mut current_week: Option<NaiveDate> = None;

    for sample in sorted {
        let sample_week = week_start(sample.date);
        let starts_new_week = sample.weekday_index() == 0
            || current.len() == DAYS_PER_WEEK
            || current_week.is_some_and(|open| sample_week > open);

        if starts_new_week && !current.is_empty() {
            weeks.push(WeekBucket::padded(&current));
            current.clear();
        }

        if current.is_empty() {
            current_week = Some(sample_week);
        }
        current.push(DayCell::from(sample));
    }

    if !current.is_empty() {
        weeks.push(WeekBucket::padded(&current));
    }

    debug!(
        samples = samples.len(),
        weeks = weeks.len(),
        "bucketed activity by week"
    );

    weeks
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn day(date: &str, count: u32) -> ActivitySample {
        ActivitySample::parse(date, count).unwrap()
    }

    fn month_of_june() -> Vec<ActivitySample> {
        (1..=30)
            .map(|d| day(&format!("2024-06-{d:02}"), d % 5))
            .collect()
    }

    fn flatten(weeks: &[WeekBucket]) -> Vec<ActivitySample> {
        weeks.iter().flat_map(|w| w.real_days()).collect()
    }

    #[test]
    fn test_week_start() {
        // 2024-06-05 is a Wednesday
        let wed = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        assert_eq!(week_start(wed), NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());

        let sun = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
        assert_eq!(week_start(sun), sun);
    }

    #[test]
    fn test_full_month_round_trip() {
        let samples = month_of_june();
        let weeks = bucket_by_week(&samples);

        // 2024-06-01 is a Saturday: [1] [2..8] [9..15] [16..22] [23..29] [30]
        assert_eq!(weeks.len(), 6);
        for week in &weeks {
            assert_eq!(week.days().len(), 7);
        }
        assert_eq!(flatten(&weeks), samples);

        assert_eq!(weeks[0].padding_count(), 6);
        assert_eq!(weeks[1].padding_count(), 0);
        assert_eq!(weeks[1].days()[0].date, Some(day("2024-06-02", 0).date));
        assert_eq!(weeks[5].padding_count(), 6);
    }

    #[test]
    fn test_single_wednesday_is_end_padded() {
        let weeks = bucket_by_week(&[day("2024-06-05", 4)]);

        assert_eq!(weeks.len(), 1);
        let days = weeks[0].days();
        assert_eq!(days[0], DayCell::from(day("2024-06-05", 4)));
        assert!(days[1..].iter().all(DayCell::is_padding));
    }

    #[test]
    fn test_unsorted_input_matches_sorted() {
        let sorted = month_of_june();
        let mut shuffled = sorted.clone();
        shuffled.reverse();
        shuffled.swap(3, 17);
        let before = shuffled.clone();

        let first = bucket_by_week(&shuffled);
        let second = bucket_by_week(&shuffled);

        assert_eq!(first, second);
        assert_eq!(first, bucket_by_week(&sorted));
        assert_eq!(shuffled, before);
    }

    #[test]
    fn test_empty_input() {
        assert!(bucket_by_week(&[]).is_empty());
    }

    #[test]
    fn test_sunday_starts_new_week() {
        let weeks = bucket_by_week(&[day("2024-06-08", 1), day("2024-06-09", 2)]);
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[1].days()[0].count, 2);
    }

    #[test]
    fn test_gap_across_weeks_without_sunday() {
        // Monday then the following Tuesday; no Sunday sample in between
        let weeks = bucket_by_week(&[day("2024-06-03", 1), day("2024-06-11", 2)]);
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].real_days().count(), 1);
        assert_eq!(weeks[1].real_days().count(), 1);
    }

    #[test]
    fn test_duplicates_never_overflow_a_week() {
        let samples: Vec<_> = (0..8).map(|c| day("2024-06-03", c)).collect();
        let weeks = bucket_by_week(&samples);

        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].padding_count(), 0);
        assert_eq!(weeks[1].padding_count(), 6);
        // stable sort keeps input order for equal dates
        let counts: Vec<u32> = flatten(&weeks).iter().map(|s| s.count).collect();
        assert_eq!(counts, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn test_six_month_window() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let samples: Vec<_> = start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(|d| ActivitySample::new(d, 1))
            .collect();
        assert_eq!(samples.len(), 214);

        let weeks = bucket_by_week(&samples);
        let real: usize = weeks.iter().map(|w| w.real_days().count()).sum();
        assert_eq!(real, 214);
        assert!(weeks.iter().all(|w| w.days().len() == 7));
        assert_eq!(flatten(&weeks), samples);
    }
}
