use eframe::egui::{self, Color32, RichText, Ui};

use crate::chart::ChartModel;

const TITLE_SIZE: f32 = 36.0;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Chart title above the plot, with a short summary of what is drawn.
pub fn title_bar(ui: &mut Ui, chart: &ChartModel) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(&chart.title).size(TITLE_SIZE).strong());
    });

    ui.horizontal(|ui: &mut Ui| {
        ui.label(
            RichText::new(format!(
                "{} curves, {} MPP markers",
                chart.curves.len(),
                chart.mpp.len()
            ))
            .color(Color32::GRAY),
        );

        let empty: Vec<&str> = chart
            .curves
            .iter()
            .filter(|c| c.is_empty())
            .map(|c| c.label.as_str())
            .collect();
        if !empty.is_empty() {
            ui.separator();
            ui.label(RichText::new(format!("No data: {}", empty.join(", "))).color(Color32::RED));
        }
    });
    ui.add_space(4.0);
}

/// Shown instead of the plot when a chart ends up with nothing to draw.
pub fn empty_chart(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("No intensities selected for this chart");
    });
}

pub fn apply_style(ctx: &egui::Context) {
    ctx.set_theme(egui::Theme::Light);
    ctx.style_mut(|style| {
        style
            .text_styles
            .insert(egui::TextStyle::Body, egui::FontId::proportional(16.0));
        style
            .text_styles
            .insert(egui::TextStyle::Small, egui::FontId::proportional(16.0));
    });
}
