use std::{fs, path::Path};

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::{common, layout::DEFAULT_MARKER_DIAMETER_PX, metric::MetricSelector};

/// Dashboard constants. Every field has a default, so a config file only lists overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Canvas width in pixels; the background image is stretched to it.
    pub canvas_width: f64,
    /// Canvas height in pixels.
    pub canvas_height: f64,
    /// Diameter of the largest marker of a render.
    pub marker_diameter_px: f64,
    /// Period selected on startup; `None` shows every period unfiltered.
    pub default_period: Option<String>,
    /// Metric selected on startup.
    pub default_metric: MetricSelector,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            canvas_width: 898.0,
            canvas_height: 1032.0,
            marker_diameter_px: DEFAULT_MARKER_DIAMETER_PX,
            default_period: Some("2018JJ00".to_string()),
            default_metric: MetricSelector::Population,
        }
    }
}

impl DashboardConfig {
    /// Read overrides from a JSON file.
    pub fn read_json(path: &Path) -> Result<Self> {
        common::require_file_exists(path)?;
        let bytes = fs::read(path)
            .with_context(|| format!("[config] Failed to read {}", path.display()))?;
        Self::from_json_slice(&bytes)
            .with_context(|| format!("[config] Failed to parse {}", path.display()))
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let config: Self = serde_json::from_slice(bytes)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        ensure!(self.canvas_width > 0.0 && self.canvas_height > 0.0,
            "[config] canvas must have a positive size, got {}x{}", self.canvas_width, self.canvas_height);
        ensure!(self.marker_diameter_px > 0.0,
            "[config] marker_diameter_px must be positive, got {}", self.marker_diameter_px);
        Ok(())
    }
}
