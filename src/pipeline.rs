//! Pipeline orchestration
//!
//! String-in / string-out entry points for hosts that talk JSON (the FFI
//! layer and the CLI), plus a `BoardProcessor` that carries a configuration
//! across calls.

use serde::{Deserialize, Serialize};

use crate::config::BoardConfig;
use crate::error::BoardError;
use crate::heatmap::{build_heatmap, HeatmapOptions, HeatmapReport};
use crate::navigation::NavigationChrome;
use crate::responsive::{DeviceInfo, ResponsivePolicy};
use crate::session::LoginService;
use crate::types::{
    ActivitySample, ActivitySummary, LayoutDecision, Platform, RawActivitySample, Viewport,
};

/// Layout decision plus the device facts it was derived from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutReport {
    pub device: DeviceInfo,
    pub layout: LayoutDecision,
    pub chrome: NavigationChrome,
}

fn convert_samples(raw: Vec<RawActivitySample>) -> Result<Vec<ActivitySample>, BoardError> {
    raw.into_iter()
        .enumerate()
        .map(|(idx, sample)| {
            ActivitySample::try_from(sample).map_err(|e| match e {
                BoardError::InvalidDate(msg) => {
                    BoardError::InvalidDate(format!("sample {idx}: {msg}"))
                }
                other => other,
            })
        })
        .collect()
}

/// Parse a JSON array of `{"date": "YYYY-MM-DD", "count": n}` samples.
pub fn parse_samples_json(json: &str) -> Result<Vec<ActivitySample>, BoardError> {
    let raw: Vec<RawActivitySample> = serde_json::from_str(json)?;
    convert_samples(raw)
}

/// Parse newline-delimited JSON samples; blank lines are skipped.
pub fn parse_samples_ndjson(ndjson: &str) -> Result<Vec<ActivitySample>, BoardError> {
    let mut raw = Vec::new();
    for (line_num, line) in ndjson.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<RawActivitySample>(trimmed) {
            Ok(sample) => raw.push(sample),
            Err(e) => {
                return Err(BoardError::ParseError(format!(
                    "Failed to parse line {}: {}",
                    line_num + 1,
                    e
                )));
            }
        }
    }
    convert_samples(raw)
}

/// Convert a JSON sample array into a heat-map report JSON.
///
/// # Arguments
/// * `samples_json` - JSON array of activity samples
/// * `screen_width` - Width available to the chart, for the scroll decision
///
/// # Example
/// ```ignore
/// let report = activity_to_heatmap_json(
///     r#"[{"date": "2024-06-02", "count": 3}]"#.to_string(),
///     390.0,
/// )?;
/// ```
pub fn activity_to_heatmap_json(
    samples_json: String,
    screen_width: f64,
) -> Result<String, BoardError> {
    BoardProcessor::new().heatmap_json(&samples_json, screen_width)
}

/// Convert a JSON sample array into summary statistics JSON.
pub fn activity_summary_json(samples_json: String) -> Result<String, BoardError> {
    let samples = parse_samples_json(&samples_json)?;
    let summary = ActivitySummary::from_samples(&samples)?;
    Ok(serde_json::to_string(&summary)?)
}

/// Resolve a viewport into layout report JSON.
pub fn viewport_to_layout_json(
    width: f64,
    height: f64,
    platform: Platform,
) -> Result<String, BoardError> {
    let report = BoardProcessor::new().layout(&Viewport::new(width, height, platform));
    Ok(serde_json::to_string(&report)?)
}

/// Processor bound to a configuration.
///
/// Holds no per-call state; reuse it across render passes so configured
/// breakpoints and chart options apply consistently.
#[derive(Debug, Clone, Default)]
pub struct BoardProcessor {
    config: BoardConfig,
}

impl BoardProcessor {
    /// Create a processor with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor with a validated configuration
    pub fn with_config(config: BoardConfig) -> Result<Self, BoardError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Replace the configuration from TOML
    pub fn load_config(&mut self, toml_str: &str) -> Result<(), BoardError> {
        self.config = BoardConfig::from_toml_str(toml_str)?;
        Ok(())
    }

    pub fn policy(&self) -> ResponsivePolicy {
        self.config.policy()
    }

    pub fn heatmap_options(&self) -> HeatmapOptions {
        self.config.heatmap
    }

    pub fn layout(&self, viewport: &Viewport) -> LayoutReport {
        let layout = self.policy().resolve_viewport(viewport);
        LayoutReport {
            device: DeviceInfo::with_breakpoints(viewport, &self.config.breakpoints),
            layout,
            chrome: NavigationChrome::from_layout(&layout),
        }
    }

    pub fn heatmap(
        &self,
        samples: &[ActivitySample],
        screen_width: f64,
    ) -> Result<HeatmapReport, BoardError> {
        build_heatmap(samples, &self.config.heatmap, screen_width)
    }

    pub fn heatmap_json(&self, samples_json: &str, screen_width: f64) -> Result<String, BoardError> {
        let samples = parse_samples_json(samples_json)?;
        let report = self.heatmap(&samples, screen_width)?;
        Ok(serde_json::to_string(&report)?)
    }

    /// Login simulation using the configured delay
    pub fn login_service(&self) -> LoginService {
        LoginService::new(self.config.login.delay())
    }
}
