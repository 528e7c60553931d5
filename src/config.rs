use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::COLUMNS_PER_LEVEL;
use crate::data::model::{IntensityColumn, MppPoint, PlotMode};

pub const DEFAULT_INPUT: &str = "CSV Data File.csv";
pub const DEFAULT_AREA_CM2: f64 = 0.045;

/// Percentages of the twelve measured light intensities, lowest first.
const INTENSITY_PERCENTS: [u32; 12] = [1, 3, 10, 16, 25, 32, 40, 50, 63, 79, 93, 100];

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("solar cell area must be a positive number of cm², got {0}")]
    InvalidArea(f64),
    #[error("no intensity columns configured")]
    NoIntensities,
    #[error("color_levels must be at least 1")]
    NoColorLevels,
    #[error("chart {chart} selects column {column}, which is not a configured intensity")]
    UnknownColumn { chart: usize, column: usize },
}

// ---------------------------------------------------------------------------
// Chart selection
// ---------------------------------------------------------------------------

/// One window to show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub mode: PlotMode,
    /// Voltage columns to draw, in intensity order. `None` draws all of them.
    pub columns: Option<Vec<usize>>,
    pub show_mpp: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            mode: PlotMode::Jv,
            columns: None,
            show_mpp: false,
        }
    }
}

// ---------------------------------------------------------------------------
// PlotConfig
// ---------------------------------------------------------------------------

/// Everything the viewer needs besides the measurement file itself.
///
/// Missing fields fall back to [`PlotConfig::default`], so `{}` is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub input_path: PathBuf,
    pub area_cm2: f64,
    /// Physical rows above the first numeric row.
    pub header_rows: usize,
    /// Intensity ranks the palette is spread over.
    pub color_levels: usize,
    pub intensity_columns: Vec<IntensityColumn>,
    pub mpp_points: Vec<MppPoint>,
    pub charts: Vec<ChartConfig>,
    pub maximize_window: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        let intensity_columns = INTENSITY_PERCENTS
            .iter()
            .enumerate()
            .map(|(rank, pct)| {
                IntensityColumn::new(rank * COLUMNS_PER_LEVEL, format!("Light intensity {pct}%"))
            })
            .collect();

        let subset = vec![8, 28, 44];

        PlotConfig {
            input_path: PathBuf::from(DEFAULT_INPUT),
            area_cm2: DEFAULT_AREA_CM2,
            header_rows: 1,
            color_levels: INTENSITY_PERCENTS.len(),
            intensity_columns,
            mpp_points: vec![
                MppPoint {
                    percent: 10,
                    voltage: 0.80,
                    current_ma: -0.10,
                },
                MppPoint {
                    percent: 50,
                    voltage: 0.86,
                    current_ma: -0.31,
                },
                MppPoint {
                    percent: 100,
                    voltage: 0.89,
                    current_ma: -0.51,
                },
            ],
            charts: vec![
                ChartConfig::default(),
                ChartConfig {
                    mode: PlotMode::Jv,
                    columns: Some(subset.clone()),
                    show_mpp: true,
                },
                ChartConfig {
                    mode: PlotMode::Power,
                    columns: Some(subset),
                    show_mpp: true,
                },
            ],
            maximize_window: true,
        }
    }
}

impl PlotConfig {
    /// Read a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: PlotConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing config")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.area_cm2.is_finite() || self.area_cm2 <= 0.0 {
            return Err(ConfigError::InvalidArea(self.area_cm2));
        }
        if self.color_levels == 0 {
            return Err(ConfigError::NoColorLevels);
        }
        if self.intensity_columns.is_empty() {
            return Err(ConfigError::NoIntensities);
        }

        for ic in &self.intensity_columns {
            if ic.column % COLUMNS_PER_LEVEL != 0 {
                log::warn!(
                    "intensity '{}' uses column {}, not a multiple of {COLUMNS_PER_LEVEL}",
                    ic.label,
                    ic.column
                );
            }
        }

        for (chart, cfg) in self.charts.iter().enumerate() {
            for &column in cfg.columns.iter().flatten() {
                if !self.intensity_columns.iter().any(|ic| ic.column == column) {
                    return Err(ConfigError::UnknownColumn { chart, column });
                }
            }
        }
        Ok(())
    }

    /// The intensities a chart draws, in configured order.
    pub fn intensities_for(&self, chart: &ChartConfig) -> Vec<IntensityColumn> {
        match &chart.columns {
            None => self.intensity_columns.clone(),
            Some(cols) => self
                .intensity_columns
                .iter()
                .filter(|ic| cols.contains(&ic.column))
                .cloned()
                .collect(),
        }
    }
}
