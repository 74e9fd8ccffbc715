use crate::types::MetricValue;
use egui::{Color32, CornerRadius, Frame, Margin, RichText};

pub const GREEN: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);
pub const BLUE: Color32 = Color32::from_rgb(0x21, 0x96, 0xF3);
pub const ORANGE: Color32 = Color32::from_rgb(0xFF, 0x98, 0x00);
pub const RED: Color32 = Color32::from_rgb(0xFF, 0x57, 0x22);

/// Display text for a metric. Missing data never shows as a number.
pub fn metric_text<T>(value: &MetricValue<T>, format: impl Fn(&T) -> String) -> String {
    match value {
        MetricValue::Available(v) => format(v),
        MetricValue::NoData => "No data".to_string(),
        MetricValue::Unavailable(_) => "Unavailable".to_string(),
    }
}

/// Coloured tile with a label over a large value
pub struct MetricCard;

impl MetricCard {
    pub fn show<T>(
        ui: &mut egui::Ui,
        label: &str,
        value: &MetricValue<T>,
        color: Color32,
        format: impl Fn(&T) -> String,
    ) {
        let response = Frame::new()
            .fill(color)
            .corner_radius(CornerRadius::same(10))
            .inner_margin(Margin::same(20))
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(label).size(18.0).color(Color32::WHITE));
                    ui.label(
                        RichText::new(metric_text(value, format))
                            .size(28.0)
                            .strong()
                            .color(Color32::WHITE),
                    );
                });
            })
            .response;

        if let MetricValue::Unavailable(reason) = value {
            response.on_hover_text(reason);
        }
    }
}
