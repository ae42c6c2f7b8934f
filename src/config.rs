//! Configuration for the streaming chart dashboard.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::buffer::DEFAULT_CAPACITY;
use crate::error::{Result, StreamChartError};
use crate::renderer::ChartStyle;

// ─────────────────────────────────────────────────────────────────────────────
// StreamChartConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration.
///
/// Every field has a default, so a config file only needs to list the values
/// it changes:
///
/// ```yaml
/// capacity: 50000
/// rate_ms: 50
/// style:
///   line_width: 2.0
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamChartConfig {
    // ── Stream / data ────────────────────────────────────────────────────────
    /// Maximum number of samples in the rolling window.
    pub capacity: usize,
    /// Samples generated at mount, before the producer starts.
    pub initial_samples: usize,
    /// Spacing of the initial samples in milliseconds.
    pub initial_step_ms: i64,
    /// Producer emission interval in milliseconds.
    pub rate_ms: u64,
    /// Samples per producer chunk.
    pub chunk_size: usize,
    /// Lower bound of the rate slider.
    pub min_rate_ms: u64,
    /// Upper bound of the rate slider.
    pub max_rate_ms: u64,

    // ── Window / layout ──────────────────────────────────────────────────────
    /// Native window title.
    pub title: String,
    /// Initial native window size in logical pixels.
    pub window_size: [f32; 2],
    /// Chart height in logical pixels.
    pub chart_height: f32,
    /// Width of the table side panel.
    pub table_width: f32,
    pub show_table: bool,
    pub show_performance: bool,

    // ── Appearance ───────────────────────────────────────────────────────────
    pub style: ChartStyle,
}

impl Default for StreamChartConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            initial_samples: 10_000,
            initial_step_ms: 100,
            rate_ms: 100,
            chunk_size: 200,
            min_rate_ms: 20,
            max_rate_ms: 1000,

            title: "Stream Chart".to_string(),
            window_size: [1400.0, 760.0],
            chart_height: 380.0,
            table_width: 420.0,
            show_table: true,
            show_performance: true,

            style: ChartStyle::default(),
        }
    }
}

impl StreamChartConfig {
    /// Load a config file; `.json` is parsed as JSON, anything else as YAML.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| StreamChartError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let cfg = if is_json {
            Self::from_json_str(&text)?
        } else {
            Self::from_yaml_str(&text)?
        };
        tracing::info!(?path, "loaded config");
        Ok(cfg)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(StreamChartError::InvalidConfig(msg));
        if self.capacity == 0 {
            return invalid("capacity must be at least 1".into());
        }
        if self.chunk_size == 0 {
            return invalid("chunk_size must be at least 1".into());
        }
        if self.rate_ms == 0 {
            return invalid("rate_ms must be at least 1".into());
        }
        if self.min_rate_ms > self.max_rate_ms {
            return invalid(format!(
                "min_rate_ms ({}) exceeds max_rate_ms ({})",
                self.min_rate_ms, self.max_rate_ms
            ));
        }
        if !(self.min_rate_ms..=self.max_rate_ms).contains(&self.rate_ms) {
            return invalid(format!(
                "rate_ms ({}) outside slider range {}..={}",
                self.rate_ms, self.min_rate_ms, self.max_rate_ms
            ));
        }
        if !(self.chart_height > 0.0) {
            return invalid("chart_height must be positive".into());
        }
        Ok(())
    }
}
