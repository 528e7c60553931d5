use thiserror::Error;

use super::model::{DerivedCurve, IntensityColumn, MeasurementTable, PlotMode};
use crate::color::color_for_column;

#[derive(Debug, Error, PartialEq)]
pub enum ExtractError {
    #[error("column {column} is out of range, the table has {width} columns")]
    ColumnOutOfRange { column: usize, width: usize },
    #[error("line {line}, column {column}: '{cell}' is not a number")]
    NotANumber {
        line: usize,
        column: usize,
        cell: String,
    },
}

/// Settings shared by every curve of one chart.
#[derive(Debug, Clone, Copy)]
pub struct Extraction {
    /// Leading physical rows that are not numeric.
    pub header_rows: usize,
    pub area_cm2: f64,
    pub mode: PlotMode,
    pub color_levels: usize,
}

// ---------------------------------------------------------------------------
// Unit conversion
// ---------------------------------------------------------------------------

pub fn amps_to_milliamps(current_a: f64) -> f64 {
    current_a * 1000.0
}

/// mA → mA·cm⁻².
pub fn current_density(current_ma: f64, area_cm2: f64) -> f64 {
    current_ma / area_cm2
}

/// V × mA → mW.
pub fn power_mw(voltage: f64, current_ma: f64) -> f64 {
    voltage * current_ma
}

// ---------------------------------------------------------------------------
// Column extraction
// ---------------------------------------------------------------------------

/// Read the voltage column `column` and current column `column + 1` below the
/// header rows. Returns volts and amps of equal length.
///
/// Rows where both cells are blank are skipped. A lone blank cell reads as
/// NaN so the curve shows a gap there; text that does not parse as a float is
/// an error.
pub fn read_pair(
    table: &MeasurementTable,
    column: usize,
    header_rows: usize,
) -> Result<(Vec<f64>, Vec<f64>), ExtractError> {
    let width = table.width();
    let current_column = column
        .checked_add(1)
        .filter(|c| *c < width)
        .ok_or(ExtractError::ColumnOutOfRange { column, width })?;

    let mut voltage = Vec::new();
    let mut current = Vec::new();

    for row in header_rows..table.len() {
        let line = row + 1;
        let v_cell = table.cell(row, column).unwrap_or("");
        let i_cell = table.cell(row, current_column).unwrap_or("");

        if v_cell.is_empty() && i_cell.is_empty() {
            continue;
        }

        voltage.push(parse_cell(v_cell, line, column)?);
        current.push(parse_cell(i_cell, line, current_column)?);
    }

    Ok((voltage, current))
}

fn parse_cell(cell: &str, line: usize, column: usize) -> Result<f64, ExtractError> {
    if cell.is_empty() {
        return Ok(f64::NAN);
    }
    cell.parse::<f64>().map_err(|_| ExtractError::NotANumber {
        line,
        column,
        cell: cell.to_string(),
    })
}

/// Build the plotted curve for one intensity.
pub fn derive_curve(
    table: &MeasurementTable,
    intensity: &IntensityColumn,
    settings: &Extraction,
) -> Result<DerivedCurve, ExtractError> {
    let (voltage, current_a) = read_pair(table, intensity.column, settings.header_rows)?;

    let values = voltage
        .iter()
        .zip(current_a.iter())
        .map(|(&v, &i)| {
            let current_ma = amps_to_milliamps(i);
            match settings.mode {
                PlotMode::Jv => current_density(current_ma, settings.area_cm2),
                PlotMode::Power => power_mw(v, current_ma),
            }
        })
        .collect();

    Ok(DerivedCurve {
        column: intensity.column,
        label: intensity.label.clone(),
        voltage,
        values,
        color: color_for_column(intensity.column, settings.color_levels),
    })
}
