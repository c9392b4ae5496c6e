//! Calendar heat-map report
//!
//! Bundles everything a host needs to draw the activity grid: padded weeks
//! with intensity levels, the legend, weekday labels, the summary numbers and
//! the chart geometry used to decide whether the grid scrolls horizontally.

use serde::{Deserialize, Serialize};

use crate::activity::{bucket_by_week, IntensityLevel};
use crate::error::BoardError;
use crate::types::{ActivitySample, ActivitySummary, DayCell, DAYS_PER_WEEK};

/// Weekday labels, Sunday first
pub const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] = ["日", "月", "火", "水", "木", "金", "土"];

/// Horizontal padding added around the grid
pub const CHART_PADDING: f64 = 24.0;

/// Screen margin kept free before the grid has to scroll
pub const SCREEN_MARGIN: f64 = 32.0;

pub const HEATMAP_TITLE: &str = "学習アクティビティ";
pub const HEATMAP_SUBTITLE: &str = "過去7ヶ月の学習記録";
pub const LEGEND_LOW_LABEL: &str = "少ない";
pub const LEGEND_HIGH_LABEL: &str = "多い";

/// Grid rendering options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapOptions {
    /// Cell edge length in logical pixels
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,
    /// Gap between cells in logical pixels
    #[serde(default = "default_cell_gap")]
    pub cell_gap: u32,
    /// Render title and weekday labels
    #[serde(default = "default_true")]
    pub show_labels: bool,
}

fn default_cell_size() -> u32 {
    10
}
fn default_cell_gap() -> u32 {
    2
}
fn default_true() -> bool {
    true
}

impl Default for HeatmapOptions {
    fn default() -> Self {
        Self {
            cell_size: default_cell_size(),
            cell_gap: default_cell_gap(),
            show_labels: true,
        }
    }
}

/// A grid cell with its intensity; padding cells have no level and render
/// transparent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapCell {
    #[serde(flatten)]
    pub day: DayCell,
    pub level: Option<IntensityLevel>,
}

impl From<DayCell> for HeatmapCell {
    fn from(day: DayCell) -> Self {
        let level = (!day.is_padding()).then(|| IntensityLevel::from_count(day.count));
        Self { day, level }
    }
}

impl HeatmapCell {
    pub fn color(&self) -> Option<&'static str> {
        self.level.map(|l| l.color())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub level: IntensityLevel,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Legend {
    pub low_label: String,
    pub high_label: String,
    pub entries: Vec<LegendEntry>,
}

impl Default for Legend {
    fn default() -> Self {
        Self {
            low_label: LEGEND_LOW_LABEL.to_string(),
            high_label: LEGEND_HIGH_LABEL.to_string(),
            entries: IntensityLevel::ALL
                .iter()
                .map(|level| LegendEntry {
                    level: *level,
                    color: level.color().to_string(),
                })
                .collect(),
        }
    }
}

/// Everything needed to render the activity heat map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapReport {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    /// Sunday..Saturday columns, oldest first
    pub weeks: Vec<[HeatmapCell; DAYS_PER_WEEK]>,
    pub summary: ActivitySummary,
    pub legend: Legend,
    /// Row labels; only every other weekday is shown to save space.
    /// Empty when labels are disabled.
    pub weekday_labels: Vec<String>,
    pub chart_width: f64,
    /// Grid is wider than the screen and should scroll horizontally
    pub scrollable: bool,
    pub options: HeatmapOptions,
}

/// Weekday labels with every even index blanked
pub fn weekday_labels() -> Vec<String> {
    WEEKDAY_LABELS
        .iter()
        .enumerate()
        .map(|(i, label)| if i % 2 == 1 { label.to_string() } else { String::new() })
        .collect()
}

/// Total grid width for a number of week columns
pub fn chart_width(week_count: usize, options: &HeatmapOptions) -> f64 {
    let column = f64::from(options.cell_size) + f64::from(options.cell_gap);
    week_count as f64 * column + CHART_PADDING
}

/// Build a heat-map report.
///
/// Fails with `EmptyInput` when there are no samples, since the summary has
/// no maximum to report.
pub fn build_heatmap(
    samples: &[ActivitySample],
    options: &HeatmapOptions,
    screen_width: f64,
) -> Result<HeatmapReport, BoardError> {
    let summary = ActivitySummary::from_samples(samples)?;

    let weeks: Vec<[HeatmapCell; DAYS_PER_WEEK]> = bucket_by_week(samples)
        .iter()
        .map(|week| (*week.days()).map(HeatmapCell::from))
        .collect();

    let width = chart_width(weeks.len(), options);
    let scrollable = width > screen_width - SCREEN_MARGIN;

    let (title, subtitle, labels) = if options.show_labels {
        (
            Some(HEATMAP_TITLE.to_string()),
            Some(HEATMAP_SUBTITLE.to_string()),
            weekday_labels(),
        )
    } else {
        (None, None, Vec::new())
    };

    Ok(HeatmapReport {
        title,
        subtitle,
        weeks,
        summary,
        legend: Legend::default(),
        weekday_labels: labels,
        chart_width: width,
        scrollable,
        options: *options,
    })
}
