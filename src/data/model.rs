use std::fmt;

use eframe::egui::Color32;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// MeasurementTable – the raw grid read from disk
// ---------------------------------------------------------------------------

/// Every physical row of the measurement file, header rows included.
///
/// Cells are kept as text; numeric conversion happens per curve in
/// [`crate::data::extract`]. Rows may be ragged.
#[derive(Debug, Clone, Default)]
pub struct MeasurementTable {
    pub rows: Vec<Vec<String>>,
}

impl MeasurementTable {
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        MeasurementTable { rows }
    }

    /// Number of physical rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Widest row, i.e. the number of addressable columns.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Cell at `(row, column)`, `None` when the row is too short.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Configuration-facing records
// ---------------------------------------------------------------------------

/// One light-intensity sweep: voltage in `column`, current in `column + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntensityColumn {
    pub column: usize,
    pub label: String,
}

impl IntensityColumn {
    pub fn new(column: usize, label: impl Into<String>) -> Self {
        IntensityColumn {
            column,
            label: label.into(),
        }
    }
}

/// A literal maximum-power-point annotation.
///
/// The current is kept in milliamps so that `current_ma / area` is a current
/// density and `current_ma * voltage` is a power in mW.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MppPoint {
    pub percent: u32,
    pub voltage: f64,
    pub current_ma: f64,
}

/// What the y axis shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlotMode {
    /// Current density (mA·cm⁻²) against voltage.
    Jv,
    /// Power (mW) against voltage.
    Power,
}

impl fmt::Display for PlotMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotMode::Jv => write!(f, "jv"),
            PlotMode::Power => write!(f, "power"),
        }
    }
}

// ---------------------------------------------------------------------------
// DerivedCurve – one plotted line
// ---------------------------------------------------------------------------

/// Voltage against current density or power for one intensity, ready to draw.
#[derive(Debug, Clone)]
pub struct DerivedCurve {
    /// Voltage column the curve was read from; drives the colour.
    pub column: usize,
    pub label: String,
    /// Volts.
    pub voltage: Vec<f64>,
    /// mA·cm⁻² in JV mode, mW in power mode. Same length as `voltage`.
    pub values: Vec<f64>,
    pub color: Color32,
}

impl DerivedCurve {
    pub fn is_empty(&self) -> bool {
        self.voltage.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.voltage
            .iter()
            .zip(self.values.iter())
            .map(|(&v, &y)| [v, y])
    }

    /// Unbroken runs of finite points; a NaN from a blank cell starts a new run.
    pub fn segments(&self) -> Vec<Vec<[f64; 2]>> {
        let mut runs: Vec<Vec<[f64; 2]>> = Vec::new();
        let mut current = Vec::new();
        for p in self.points() {
            if p[0].is_finite() && p[1].is_finite() {
                current.push(p);
            } else if !current.is_empty() {
                runs.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }

    /// Legend text, with the source column so duplicate labels stay apart.
    pub fn legend_name(&self, duplicated: bool) -> String {
        if duplicated {
            format!("{} (col {})", self.label, self.column)
        } else {
            self.label.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(voltage: Vec<f64>, values: Vec<f64>) -> DerivedCurve {
        DerivedCurve {
            column: 8,
            label: "Light intensity 10%".to_string(),
            voltage,
            values,
            color: Color32::BLACK,
        }
    }

    #[test]
    fn segments_split_at_gaps() {
        let c = curve(
            vec![0.0, 0.1, 0.2, f64::NAN, 0.4, 0.5],
            vec![1.0, f64::NAN, 3.0, 4.0, 5.0, 6.0],
        );
        assert_eq!(
            c.segments(),
            vec![
                vec![[0.0, 1.0]],
                vec![[0.2, 3.0]],
                vec![[0.4, 5.0], [0.5, 6.0]],
            ]
        );
    }

    #[test]
    fn all_gaps_give_no_segments() {
        let c = curve(vec![f64::NAN], vec![1.0]);
        assert!(c.segments().is_empty());
    }

    #[test]
    fn legend_name_adds_column_only_for_duplicates() {
        let c = curve(vec![], vec![]);
        assert_eq!(c.legend_name(false), "Light intensity 10%");
        assert_eq!(c.legend_name(true), "Light intensity 10% (col 8)");
    }

    #[test]
    fn table_cells_and_width() {
        let t = MeasurementTable::from_rows(vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["1".to_string()],
        ]);
        assert_eq!(t.width(), 2);
        assert_eq!(t.cell(1, 0), Some("1"));
        assert_eq!(t.cell(1, 1), None);
        assert_eq!(t.cell(5, 0), None);
    }
}
