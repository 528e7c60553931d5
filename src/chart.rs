use anyhow::{Context, Result};

use crate::config::{ChartConfig, PlotConfig};
use crate::data::extract::{current_density, derive_curve, power_mw, Extraction};
use crate::data::model::{DerivedCurve, MeasurementTable, MppPoint, PlotMode};

// ---------------------------------------------------------------------------
// Fixed axis ticks
// ---------------------------------------------------------------------------

/// -0.50, -0.45, … 1.20 V regardless of the data.
pub fn voltage_ticks() -> Vec<f64> {
    (0..35).map(|i| i as f64 * 0.05 - 0.5).collect()
}

/// -26 … 48 mA·cm⁻² in steps of 2, or -1.0 … 2.6 mW in steps of 0.1.
pub fn value_ticks(mode: PlotMode) -> Vec<f64> {
    match mode {
        PlotMode::Jv => (-26..=48).step_by(2).map(f64::from).collect(),
        PlotMode::Power => (0..37).map(|i| i as f64 * 0.1 - 1.0).collect(),
    }
}

/// Tick label text: volts and mW with two decimals, mA·cm⁻² as integers.
pub fn format_tick(value: f64, decimals: usize) -> String {
    // -1e-17 from accumulated steps would otherwise print as "-0.00"
    let value = if value.abs() < 1e-9 { 0.0 } else { value };
    format!("{value:.decimals$}")
}

/// Text placed in plot coordinates next to an axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisText {
    pub text: String,
    pub at: [f64; 2],
}

// ---------------------------------------------------------------------------
// ChartModel – everything a window draws
// ---------------------------------------------------------------------------

/// A maximum-power-point annotation in plot coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct MppMarker {
    pub label: String,
    pub x: f64,
    pub y: f64,
}

impl MppMarker {
    pub fn from_point(point: &MppPoint, area_cm2: f64, mode: PlotMode) -> Self {
        let y = match mode {
            PlotMode::Jv => current_density(point.current_ma, area_cm2),
            PlotMode::Power => power_mw(point.voltage, point.current_ma),
        };
        MppMarker {
            label: format!("MPP {}%", point.percent),
            x: point.voltage,
            y,
        }
    }

    /// Dashed guide from the y axis to the marker.
    pub fn horizontal_guide(&self) -> [[f64; 2]; 2] {
        [[0.0, self.y], [self.x, self.y]]
    }

    /// Dashed guide from the marker down (or up) to the x axis.
    pub fn vertical_guide(&self) -> [[f64; 2]; 2] {
        [[self.x, self.y], [self.x, 0.0]]
    }
}

#[derive(Debug, Clone)]
pub struct ChartModel {
    pub mode: PlotMode,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub curves: Vec<DerivedCurve>,
    pub x_ticks: Vec<f64>,
    pub y_ticks: Vec<f64>,
    pub mpp: Vec<MppMarker>,
}

impl ChartModel {
    pub fn titles(mode: PlotMode) -> (&'static str, &'static str, &'static str) {
        match mode {
            PlotMode::Jv => (
                "JV curve of Light Intensities of a Perovskite Solar Cell",
                "Voltage / V",
                "Current Density / mA cm⁻²",
            ),
            PlotMode::Power => (
                "Power-Voltage curve of Light Intensities of a Perovskite Solar Cell",
                "Voltage / V",
                "Power / mW",
            ),
        }
    }

    pub fn y_decimals(&self) -> usize {
        match self.mode {
            PlotMode::Jv => 0,
            PlotMode::Power => 2,
        }
    }

    /// Length of the x-axis tick marks, in y units.
    pub fn x_tick_len(&self) -> f64 {
        span(&self.y_ticks) * 0.01
    }

    /// Length of the y-axis tick marks, in x units.
    pub fn y_tick_len(&self) -> f64 {
        span(&self.x_ticks) * 0.006
    }

    /// Labels hanging below the x spine, one per tick.
    pub fn x_tick_labels(&self) -> Vec<AxisText> {
        let below = -self.x_tick_len();
        self.x_ticks
            .iter()
            .map(|&x| AxisText {
                text: format_tick(x, 2),
                at: [x, below],
            })
            .collect()
    }

    /// Labels left of the y spine, one per tick.
    pub fn y_tick_labels(&self) -> Vec<AxisText> {
        let left = -self.y_tick_len();
        let decimals = self.y_decimals();
        self.y_ticks
            .iter()
            .map(|&y| AxisText {
                text: format_tick(y, decimals),
                at: [left, y],
            })
            .collect()
    }

    /// Axis titles anchored at the origin: the x title under the x tick
    /// labels, the y title right of the y spine just above the x spine.
    pub fn axis_titles(&self) -> [AxisText; 2] {
        let dx = self.y_tick_len() * 2.0;
        let dy = self.x_tick_len();
        [
            AxisText {
                text: self.x_label.clone(),
                at: [dx, -dy * 4.0],
            },
            AxisText {
                text: self.y_label.clone(),
                at: [dx, dy],
            },
        ]
    }

    /// Legend names in curve order. A label used by more than one curve gets
    /// its column appended.
    pub fn legend_names(&self) -> Vec<String> {
        self.curves
            .iter()
            .map(|c| {
                let shared = self.curves.iter().filter(|o| o.label == c.label).count() > 1;
                c.legend_name(shared)
            })
            .collect()
    }

    /// Distance between an MPP marker and its text, in y units.
    pub fn label_offset(&self) -> f64 {
        span(&self.y_ticks) * 0.015
    }
}

fn span(ticks: &[f64]) -> f64 {
    match (ticks.first(), ticks.last()) {
        (Some(lo), Some(hi)) => hi - lo,
        _ => 0.0,
    }
}

/// Extract, convert and colour every curve of one chart.
pub fn build_chart(
    table: &MeasurementTable,
    config: &PlotConfig,
    chart: &ChartConfig,
) -> Result<ChartModel> {
    let settings = Extraction {
        header_rows: config.header_rows,
        area_cm2: config.area_cm2,
        mode: chart.mode,
        color_levels: config.color_levels,
    };

    let curves = config
        .intensities_for(chart)
        .iter()
        .map(|ic| {
            derive_curve(table, ic, &settings)
                .with_context(|| format!("extracting '{}' (column {})", ic.label, ic.column))
        })
        .collect::<Result<Vec<_>>>()?;

    let mpp = if chart.show_mpp {
        config
            .mpp_points
            .iter()
            .map(|p| MppMarker::from_point(p, config.area_cm2, chart.mode))
            .collect()
    } else {
        Vec::new()
    };

    let (title, x_label, y_label) = ChartModel::titles(chart.mode);
    log::info!(
        "{} chart: {} curves, {} MPP markers",
        chart.mode,
        curves.len(),
        mpp.len()
    );

    Ok(ChartModel {
        mode: chart.mode,
        title: title.to_string(),
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        curves,
        x_ticks: voltage_ticks(),
        y_ticks: value_ticks(chart.mode),
        mpp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::color_for_column;
    use crate::data::loader::read_table;

    /// 12 intensities × 4 columns, two data rows.
    fn full_table() -> MeasurementTable {
        let mut text = String::new();
        text.push_str(&(0..48).map(|c| format!("c{c}")).collect::<Vec<_>>().join(","));
        text.push('\n');
        for v in ["0.5", "0.6"] {
            let row: Vec<String> = (0..48)
                .map(|c| if c % 2 == 0 { v.to_string() } else { "0.002".to_string() })
                .collect();
            text.push_str(&row.join(","));
            text.push('\n');
        }
        read_table(text.as_bytes()).unwrap()
    }

    #[test]
    fn voltage_ticks_span_minus_half_to_one_point_two() {
        let ticks = voltage_ticks();
        assert_eq!(ticks.len(), 35);
        assert!((ticks[0] + 0.5).abs() < 1e-12);
        assert!((ticks[34] - 1.2).abs() < 1e-9);
    }

    #[test]
    fn value_ticks_per_mode() {
        let jv = value_ticks(PlotMode::Jv);
        assert_eq!(jv.first(), Some(&-26.0));
        assert_eq!(jv.last(), Some(&48.0));
        assert_eq!(jv.len(), 38);

        let power = value_ticks(PlotMode::Power);
        assert_eq!(power.len(), 37);
        assert!((power[36] - 2.6).abs() < 1e-9);
    }

    #[test]
    fn mpp_marker_values() {
        let p = MppPoint {
            percent: 100,
            voltage: 0.89,
            current_ma: -0.51,
        };
        let jv = MppMarker::from_point(&p, 0.045, PlotMode::Jv);
        assert_eq!(jv.label, "MPP 100%");
        assert!((jv.y + 11.333).abs() < 1e-3);

        let power = MppMarker::from_point(&p, 0.045, PlotMode::Power);
        assert!((power.y + 0.4539).abs() < 1e-4);
        assert_eq!(power.horizontal_guide(), [[0.0, power.y], [0.89, power.y]]);
        assert_eq!(power.vertical_guide(), [[0.89, power.y], [0.89, 0.0]]);
    }

    #[test]
    fn full_chart_draws_every_intensity_in_order() {
        let config = PlotConfig::default();
        let model = build_chart(&full_table(), &config, &config.charts[0]).unwrap();

        assert_eq!(model.curves.len(), 12);
        assert!(model.mpp.is_empty());
        assert_eq!(model.curves[0].label, "Light intensity 1%");
        assert_eq!(model.curves[11].label, "Light intensity 100%");
        assert!((model.curves[0].values[0] - 44.444).abs() < 1e-3);
        assert!(model.title.starts_with("JV curve"));
    }

    #[test]
    fn subset_chart_reuses_full_colours() {
        let config = PlotConfig::default();
        let table = full_table();
        let full = build_chart(&table, &config, &config.charts[0]).unwrap();
        let subset = build_chart(&table, &config, &config.charts[1]).unwrap();

        assert_eq!(subset.curves.len(), 3);
        for curve in &subset.curves {
            let same = full.curves.iter().find(|c| c.column == curve.column).unwrap();
            assert_eq!(curve.color, same.color);
            assert_eq!(curve.color, color_for_column(curve.column, 12));
        }
        assert_eq!(subset.mpp.len(), 3);
    }

    #[test]
    fn power_chart_uses_milliwatts() {
        let config = PlotConfig::default();
        let model = build_chart(&full_table(), &config, &config.charts[2]).unwrap();

        assert_eq!(model.mode, PlotMode::Power);
        assert_eq!(model.y_label, "Power / mW");
        assert!((model.curves[0].values[0] - 1.0).abs() < 1e-12);
        assert!((model.curves[0].values[1] - 1.2).abs() < 1e-12);
    }

    #[test]
    fn missing_column_reports_the_intensity() {
        let table = read_table("V,I\n0.1,0.001\n".as_bytes()).unwrap();
        let config = PlotConfig::default();
        let err = build_chart(&table, &config, &config.charts[0]).unwrap_err();
        assert!(format!("{err:#}").contains("Light intensity 3%"));
    }

    #[test]
    fn tick_labels_hang_off_the_spines() {
        let config = PlotConfig::default();
        let model = build_chart(&full_table(), &config, &config.charts[0]).unwrap();

        let xs = model.x_tick_labels();
        assert_eq!(xs.len(), 35);
        assert_eq!(xs[0].text, "-0.50");
        assert_eq!(xs[10].text, "0.00");
        assert_eq!(xs[34].text, "1.20");
        assert!(xs.iter().all(|t| t.at[1] < 0.0 && t.at[1] > -1.0));

        let ys = model.y_tick_labels();
        assert_eq!(ys.first().map(|t| t.text.as_str()), Some("-26"));
        assert_eq!(ys.last().map(|t| t.text.as_str()), Some("48"));
        assert!(ys.iter().all(|t| t.at[0] < 0.0 && t.at[0] > -0.05));
    }

    #[test]
    fn power_ticks_use_two_decimals() {
        let config = PlotConfig::default();
        let model = build_chart(&full_table(), &config, &config.charts[2]).unwrap();

        let texts: Vec<String> = model.y_tick_labels().into_iter().map(|t| t.text).collect();
        assert_eq!(texts[0], "-1.00");
        assert_eq!(texts[10], "0.00");
        assert_eq!(texts[36], "2.60");
    }

    #[test]
    fn axis_titles_sit_at_the_origin() {
        let config = PlotConfig::default();
        let model = build_chart(&full_table(), &config, &config.charts[0]).unwrap();
        let [x_title, y_title] = model.axis_titles();

        assert_eq!(x_title.text, "Voltage / V");
        assert_eq!(y_title.text, "Current Density / mA cm⁻²");
        // x title below the tick labels, y title above the x spine
        assert!(x_title.at[1] < model.x_tick_labels()[0].at[1]);
        assert!(y_title.at[1] > 0.0);
        for t in [&x_title, &y_title] {
            assert!(t.at[0] > 0.0 && t.at[0] < 0.05);
        }
    }

    #[test]
    fn legend_names_disambiguate_shared_labels() {
        let mut config = PlotConfig::default();
        config.intensity_columns[1].label = config.intensity_columns[0].label.clone();
        let model = build_chart(&full_table(), &config, &config.charts[0]).unwrap();

        let names = model.legend_names();
        assert_eq!(names[0], "Light intensity 1% (col 0)");
        assert_eq!(names[1], "Light intensity 1% (col 4)");
        assert_eq!(names[2], "Light intensity 10%");
    }

    #[test]
    fn negative_zero_prints_as_zero() {
        assert_eq!(format_tick(-1e-17, 2), "0.00");
        assert_eq!(format_tick(-26.0, 0), "-26");
    }
}
