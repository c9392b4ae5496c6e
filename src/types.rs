//! Core types shared by the layout resolver and the activity aggregator
//!
//! Viewports and sample sets are supplied fresh on every call; nothing here
//! is cached or persisted between calls.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::BoardError;

/// Calendar date format used on the wire (ISO 8601, no time component)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of slots in a week bucket (Sunday..Saturday)
pub const DAYS_PER_WEEK: usize = 7;

/// Host platform the layout is rendered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Web,
    Native,
}

impl Platform {
    /// Map a host OS identifier (`web`, `ios`, `android`, ...) to a platform.
    /// Anything other than `web` is native.
    pub fn from_os(os: &str) -> Self {
        if os.trim().eq_ignore_ascii_case("web") {
            Platform::Web
        } else {
            Platform::Native
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Web => "web",
            Platform::Native => "native",
        }
    }
}

/// Discrete device bucket derived from viewport width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceClass::Mobile => "mobile",
            DeviceClass::Tablet => "tablet",
            DeviceClass::Desktop => "desktop",
        }
    }
}

/// Viewport reported by the host on mount and on every resize
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in logical pixels
    pub width: f64,
    /// Height in logical pixels
    pub height: f64,
    /// Host platform
    pub platform: Platform,
}

impl Viewport {
    pub fn new(width: f64, height: f64, platform: Platform) -> Self {
        Self {
            width,
            height,
            platform,
        }
    }
}

/// Layout flags the host uses to pick its composition and chrome
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutDecision {
    /// Device class of the viewport width
    pub device_class: DeviceClass,
    /// Viewport width the decision was made for
    pub width: f64,
    /// Render the navigation sidebar
    pub use_sidebar: bool,
    /// Render the bottom tab bar
    pub use_bottom_nav: bool,
    /// Mount the desktop variant of each screen
    pub use_desktop_composition: bool,
    /// Grid columns for the default item width (always >= 1)
    pub columns: u32,
}

/// One day of recorded learning activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivitySample {
    /// Calendar date (no timezone)
    pub date: NaiveDate,
    /// Number of recorded activities on that date
    pub count: u32,
}

impl ActivitySample {
    pub fn new(date: NaiveDate, count: u32) -> Self {
        Self { date, count }
    }

    /// Build a sample from an ISO `YYYY-MM-DD` string.
    pub fn parse(date: &str, count: u32) -> Result<Self, BoardError> {
        Ok(Self {
            date: parse_sample_date(date)?,
            count,
        })
    }

    /// Weekday index with Sunday = 0 .. Saturday = 6
    pub fn weekday_index(&self) -> u32 {
        self.date.weekday().num_days_from_sunday()
    }
}

/// Wire form of a sample, before the date string is validated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawActivitySample {
    pub date: String,
    pub count: u32,
}

impl TryFrom<RawActivitySample> for ActivitySample {
    type Error = BoardError;

    fn try_from(raw: RawActivitySample) -> Result<Self, Self::Error> {
        ActivitySample::parse(&raw.date, raw.count)
    }
}

/// Parse an ISO calendar date, failing fast on anything malformed.
pub fn parse_sample_date(date: &str) -> Result<NaiveDate, BoardError> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map_err(|e| BoardError::InvalidDate(format!("{date:?}: {e}")))
}

/// A single slot of a week bucket
///
/// Padding slots have no date and a zero count; a real day without
/// activity keeps its date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DayCell {
    #[serde(with = "empty_date")]
    pub date: Option<NaiveDate>,
    pub count: u32,
}

impl DayCell {
    /// Synthetic filler slot
    pub const PADDING: DayCell = DayCell {
        date: None,
        count: 0,
    };

    pub fn is_padding(&self) -> bool {
        self.date.is_none()
    }

    /// The real sample behind this slot, if any
    pub fn sample(&self) -> Option<ActivitySample> {
        self.date.map(|date| ActivitySample::new(date, self.count))
    }
}

impl From<ActivitySample> for DayCell {
    fn from(sample: ActivitySample) -> Self {
        Self {
            date: Some(sample.date),
            count: sample.count,
        }
    }
}

/// Seven ordered slots representing one Sunday..Saturday week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekBucket {
    days: [DayCell; DAYS_PER_WEEK],
}

impl WeekBucket {
    /// Build a bucket from up to seven cells, right-padding the rest.
    ///
    /// Returns `None` if more than seven cells are supplied.
    pub fn from_cells(cells: &[DayCell]) -> Option<Self> {
        if cells.len() > DAYS_PER_WEEK {
            return None;
        }
        Some(Self::padded(cells))
    }

    /// Copy the first seven cells and right-pad the remainder.
    pub(crate) fn padded(cells: &[DayCell]) -> Self {
        let mut days = [DayCell::PADDING; DAYS_PER_WEEK];
        for (slot, cell) in days.iter_mut().zip(cells) {
            *slot = *cell;
        }
        Self { days }
    }

    pub fn days(&self) -> &[DayCell; DAYS_PER_WEEK] {
        &self.days
    }

    /// Non-padding slots in order
    pub fn real_days(&self) -> impl Iterator<Item = ActivitySample> + '_ {
        self.days.iter().filter_map(DayCell::sample)
    }

    pub fn padding_count(&self) -> usize {
        self.days.iter().filter(|d| d.is_padding()).count()
    }
}

/// Summary statistics over a raw sample set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySummary {
    /// Days with at least one activity
    pub active_day_count: usize,
    /// Highest single-day count
    pub max_daily_count: u32,
    /// Sum of all counts
    pub total_count: u64,
}

/// Serialize padding dates as the empty string, real dates as `YYYY-MM-DD`
mod empty_date {
    use super::*;

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_str(&d.format(DATE_FORMAT).to_string()),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = String::deserialize(d)?;
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(&raw, DATE_FORMAT)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_sample_date() {
        let sample = ActivitySample::parse("2024-06-02", 3).unwrap();
        assert_eq!(sample.date, NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
        // 2024-06-02 is a Sunday
        assert_eq!(sample.weekday_index(), 0);
    }

    #[test]
    fn test_invalid_date_rejected() {
        for bad in ["", "2024-13-01", "06/01/2024", "2024-02-30", "yesterday"] {
            let err = ActivitySample::parse(bad, 1).unwrap_err();
            assert!(matches!(err, BoardError::InvalidDate(_)), "{bad}");
        }
    }

    #[test]
    fn test_raw_sample_conversion() {
        let raw = RawActivitySample {
            date: "2024-06-05".to_string(),
            count: 4,
        };
        let sample = ActivitySample::try_from(raw).unwrap();
        assert_eq!(sample.count, 4);
        assert_eq!(sample.weekday_index(), 3);
    }

    #[test]
    fn test_day_cell_wire_format() {
        let padding = serde_json::to_value(DayCell::PADDING).unwrap();
        assert_eq!(padding, serde_json::json!({ "date": "", "count": 0 }));

        let zero_day = DayCell::from(ActivitySample::parse("2024-06-01", 0).unwrap());
        let json = serde_json::to_value(zero_day).unwrap();
        assert_eq!(json, serde_json::json!({ "date": "2024-06-01", "count": 0 }));
        assert!(!zero_day.is_padding());

        let back: DayCell = serde_json::from_value(json).unwrap();
        assert_eq!(back, zero_day);
    }

    #[test]
    fn test_week_bucket_from_cells() {
        let cells = [DayCell::from(ActivitySample::parse("2024-06-05", 2).unwrap())];
        let bucket = WeekBucket::from_cells(&cells).unwrap();
        assert_eq!(bucket.days().len(), DAYS_PER_WEEK);
        assert_eq!(bucket.padding_count(), 6);
        assert!(WeekBucket::from_cells(&[DayCell::PADDING; 8]).is_none());
    }

    #[test]
    fn test_platform_from_os() {
        assert_eq!(Platform::from_os("web"), Platform::Web);
        assert_eq!(Platform::from_os("ios"), Platform::Native);
        assert_eq!(Platform::from_os("android"), Platform::Native);
    }
}
