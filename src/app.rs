use anyhow::{anyhow, Result};
use eframe::egui;

use crate::chart::ChartModel;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct JvPlotApp {
    pub chart: ChartModel,
}

impl JvPlotApp {
    pub fn new(cc: &eframe::CreationContext<'_>, chart: ChartModel) -> Self {
        panels::apply_style(&cc.egui_ctx);
        Self { chart }
    }
}

impl eframe::App for JvPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title ----
        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            panels::title_bar(ui, &self.chart);
        });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.chart.curves.is_empty() {
                panels::empty_chart(ui);
            } else {
                plot::curve_plot(ui, &self.chart);
            }
        });
    }
}

// ---------------------------------------------------------------------------
// Window
// ---------------------------------------------------------------------------

/// Open a window for `chart` and block until the user closes it.
pub fn show_chart(chart: ChartModel, maximize: bool) -> Result<()> {
    let viewport = if maximize {
        egui::ViewportBuilder::default()
            .with_position([0.0, 0.0])
            .with_maximized(true)
    } else {
        egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0])
    };

    let options = eframe::NativeOptions {
        viewport: viewport.with_min_inner_size([600.0, 400.0]),
        run_and_return: true,
        ..Default::default()
    };

    let title = chart.title.clone();
    log::info!("Showing '{title}'");
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(JvPlotApp::new(cc, chart)))),
    )
    .map_err(|e| anyhow!("showing '{title}': {e}"))
}
