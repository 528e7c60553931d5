use eframe::egui::{Align2, Color32, RichText, Ui};
use egui_plot::{
    HLine, Legend, Line, LineStyle, MarkerShape, Plot, PlotPoint, PlotPoints, PlotUi, Points,
    Text, VLine,
};

use crate::chart::{AxisText, ChartModel};

const AXIS_TITLE_SIZE: f32 = 32.0;
const TICK_LABEL_SIZE: f32 = 16.0;
const MPP_LABEL_SIZE: f32 = 16.0;
const SPINE_COLOR: Color32 = Color32::BLACK;
const MPP_COLOR: Color32 = Color32::from_rgb(0x33, 0x33, 0x33);

// ---------------------------------------------------------------------------
// Curve plot (central panel)
// ---------------------------------------------------------------------------

/// Render one chart: curves, axes through the origin and MPP annotations.
pub fn curve_plot(ui: &mut Ui, chart: &ChartModel) {
    // The frame axes are replaced by spines drawn at x = 0 and y = 0.
    let mut plot = Plot::new("curve_plot")
        .legend(Legend::default())
        .show_axes([false, false])
        .show_grid(false)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);

    for &x in [chart.x_ticks.first(), chart.x_ticks.last()].into_iter().flatten() {
        plot = plot.include_x(x);
    }
    for &y in [chart.y_ticks.first(), chart.y_ticks.last()].into_iter().flatten() {
        plot = plot.include_y(y);
    }

    plot.show(ui, |plot_ui| {
        draw_spines(plot_ui, chart);

        for (curve, name) in chart.curves.iter().zip(chart.legend_names()) {
            // Every run shares the name, so the legend shows one entry per curve.
            for run in curve.segments() {
                let points: PlotPoints = run.into();
                let line = Line::new(points)
                    .name(&name)
                    .color(curve.color)
                    .width(1.5);
                plot_ui.line(line);
            }
        }

        let offset = chart.label_offset();
        for marker in &chart.mpp {
            for guide in [marker.horizontal_guide(), marker.vertical_guide()] {
                let points: PlotPoints = guide.into_iter().collect();
                plot_ui.line(
                    Line::new(points)
                        .color(MPP_COLOR)
                        .width(1.0)
                        .style(LineStyle::dashed_dense()),
                );
            }

            plot_ui.points(
                Points::new(vec![[marker.x, marker.y]])
                    .shape(MarkerShape::Cross)
                    .radius(7.0)
                    .color(MPP_COLOR),
            );

            plot_ui.text(
                Text::new(
                    PlotPoint::new(marker.x, marker.y - offset),
                    RichText::new(&marker.label).size(MPP_LABEL_SIZE),
                )
                .anchor(Align2::CENTER_TOP)
                .color(MPP_COLOR),
            );
        }
    });
}

/// Spines crossing at the origin, outward tick marks, tick labels and axis
/// titles anchored to them.
fn draw_spines(plot_ui: &mut PlotUi, chart: &ChartModel) {
    plot_ui.hline(HLine::new(0.0).color(SPINE_COLOR).width(1.0));
    plot_ui.vline(VLine::new(0.0).color(SPINE_COLOR).width(1.0));

    let x_tick_len = chart.x_tick_len();
    let y_tick_len = chart.y_tick_len();

    for &x in &chart.x_ticks {
        let points: PlotPoints = vec![[x, 0.0], [x, -x_tick_len]].into();
        plot_ui.line(Line::new(points).color(SPINE_COLOR).width(1.0));
    }
    for &y in &chart.y_ticks {
        let points: PlotPoints = vec![[0.0, y], [-y_tick_len, y]].into();
        plot_ui.line(Line::new(points).color(SPINE_COLOR).width(1.0));
    }

    for label in chart.x_tick_labels() {
        axis_text(plot_ui, label, TICK_LABEL_SIZE, Align2::CENTER_TOP);
    }
    for label in chart.y_tick_labels() {
        axis_text(plot_ui, label, TICK_LABEL_SIZE, Align2::RIGHT_CENTER);
    }

    let [x_title, y_title] = chart.axis_titles();
    axis_text(plot_ui, x_title, AXIS_TITLE_SIZE, Align2::LEFT_TOP);
    axis_text(plot_ui, y_title, AXIS_TITLE_SIZE, Align2::LEFT_BOTTOM);
}

fn axis_text(plot_ui: &mut PlotUi, label: AxisText, size: f32, anchor: Align2) {
    plot_ui.text(
        Text::new(
            PlotPoint::new(label.at[0], label.at[1]),
            RichText::new(label.text).size(size),
        )
        .anchor(anchor)
        .color(SPINE_COLOR),
    );
}
