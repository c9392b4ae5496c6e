//! Board configuration
//!
//! Everything is optional; missing sections fall back to the built-in
//! defaults (768/1024 breakpoints, 300px grid items, 10px heat-map cells,
//! 1.5s simulated login). Stored as TOML, also accepted as JSON.
//!
//! ```toml
//! [breakpoints]
//! mobile = 768.0
//! tablet = 1024.0
//!
//! [grid]
//! item_min_width = 300.0
//!
//! [heatmap]
//! cell_size = 10
//! cell_gap = 2
//! show_labels = true
//!
//! [login]
//! delay_ms = 1500
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::BoardError;
use crate::heatmap::HeatmapOptions;
use crate::responsive::{Breakpoints, ResponsivePolicy, DEFAULT_ITEM_MIN_WIDTH};
use crate::session::DEFAULT_LOGIN_DELAY_MS;

/// Grid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_item_min_width")]
    pub item_min_width: f64,
}

/// Simulated login configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginConfig {
    #[serde(default = "default_login_delay_ms")]
    pub delay_ms: u64,
}

/// Top-level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default)]
    pub breakpoints: Breakpoints,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub heatmap: HeatmapOptions,
    #[serde(default)]
    pub login: LoginConfig,
}

fn default_item_min_width() -> f64 {
    DEFAULT_ITEM_MIN_WIDTH
}
fn default_login_delay_ms() -> u64 {
    DEFAULT_LOGIN_DELAY_MS
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            item_min_width: default_item_min_width(),
        }
    }
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_login_delay_ms(),
        }
    }
}

impl LoginConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl BoardConfig {
    /// Parse and validate TOML.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, BoardError> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| BoardError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate JSON.
    pub fn from_json(json: &str) -> Result<Self, BoardError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; `.json` files are read as JSON, everything else as
    /// TOML.
    pub fn load(path: &Path) -> Result<Self, BoardError> {
        let content = fs::read_to_string(path)
            .map_err(|e| BoardError::ConfigError(format!("{}: {e}", path.display())))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_json(&content)?
        } else {
            Self::from_toml_str(&content)?
        };

        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, BoardError> {
        toml::to_string_pretty(self).map_err(|e| BoardError::ConfigError(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, BoardError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), BoardError> {
        if !self.breakpoints.is_ordered() {
            return Err(BoardError::ConfigError(format!(
                "breakpoints must satisfy 0 < mobile < tablet (got mobile={}, tablet={})",
                self.breakpoints.mobile, self.breakpoints.tablet
            )));
        }
        if !(self.grid.item_min_width.is_finite() && self.grid.item_min_width > 0.0) {
            return Err(BoardError::ConfigError(format!(
                "grid.item_min_width must be positive (got {})",
                self.grid.item_min_width
            )));
        }
        if self.heatmap.cell_size == 0 {
            return Err(BoardError::ConfigError(
                "heatmap.cell_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn policy(&self) -> ResponsivePolicy {
        ResponsivePolicy::new(self.breakpoints, self.grid.item_min_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_toml_is_default() {
        let config = BoardConfig::from_toml_str("").unwrap();
        assert_eq!(config, BoardConfig::default());
        assert_eq!(config.login.delay(), Duration::from_millis(1500));
        assert_eq!(config.heatmap.cell_size, 10);
    }

    #[test]
    fn test_partial_toml() {
        let config = BoardConfig::from_toml_str(
            r#"
            [breakpoints]
            mobile = 600.0
            tablet = 900.0

            [login]
            delay_ms = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.breakpoints.mobile, 600.0);
        assert_eq!(config.grid.item_min_width, 300.0);
        assert_eq!(config.login.delay_ms, 0);
        assert!(config.heatmap.show_labels);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = BoardConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(BoardConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_json_config() {
        let config = BoardConfig::from_json(r#"{"grid": {"item_min_width": 250.0}}"#).unwrap();
        assert_eq!(config.grid.item_min_width, 250.0);
        assert_eq!(config.policy().resolve_layout(1000.0, crate::types::Platform::Web).columns, 4);
    }

    #[test]
    fn test_rejects_unordered_breakpoints() {
        let err = BoardConfig::from_toml_str(
            r#"
            [breakpoints]
            mobile = 1200.0
            tablet = 1024.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, BoardError::ConfigError(_)));
    }

    #[test]
    fn test_rejects_bad_grid_width() {
        let err = BoardConfig::from_toml_str("[grid]\nitem_min_width = 0.0\n").unwrap_err();
        assert!(matches!(err, BoardError::ConfigError(_)));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(matches!(
            BoardConfig::from_toml_str("[breakpoints"),
            Err(BoardError::ConfigError(_))
        ));
    }
}
