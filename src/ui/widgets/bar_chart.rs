use crate::types::MetricValue;
use egui::{Color32, CornerRadius, Rect, Sense, vec2};

const BAR_HEIGHT: f32 = 18.0;
const MAX_BAR_WIDTH: f32 = 420.0;

pub struct BarChart;

impl BarChart {
    /// Horizontal bars, one row per `(label, value)`, scaled to the largest value
    pub fn show(
        ui: &mut egui::Ui,
        id: &str,
        title: &str,
        bars: &MetricValue<Vec<(String, f64)>>,
        format: impl Fn(f64) -> String,
    ) {
        ui.strong(title);

        let bars = match bars {
            MetricValue::Available(bars) => bars,
            MetricValue::NoData => {
                ui.label("No data");
                return;
            }
            MetricValue::Unavailable(reason) => {
                ui.colored_label(Color32::RED, "Unavailable").on_hover_text(reason);
                return;
            }
        };

        let max = bars.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
        let count = bars.len();

        egui::Grid::new(id)
            .num_columns(3)
            .spacing([10.0, 4.0])
            .show(ui, |ui| {
                for (idx, (label, value)) in bars.iter().enumerate() {
                    ui.label(label);

                    let width = if max > 0.0 {
                        (value / max) as f32 * MAX_BAR_WIDTH
                    } else {
                        0.0
                    };
                    let (rect, response) =
                        ui.allocate_exact_size(vec2(MAX_BAR_WIDTH, BAR_HEIGHT), Sense::hover());
                    let bar = Rect::from_min_size(rect.min, vec2(width.max(1.0), rect.height()));
                    ui.painter()
                        .rect_filled(bar, CornerRadius::same(2), palette(idx, count));
                    response.on_hover_text(format(*value));

                    ui.label(format(*value));
                    ui.end_row();
                }
            });
    }
}

/// Dark purple to yellow-green, approximating a viridis ramp
fn palette(idx: usize, count: usize) -> Color32 {
    let t = if count > 1 { idx as f32 / (count - 1) as f32 } else { 0.0 };
    let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Color32::from_rgb(lerp(0x44, 0xB5), lerp(0x01, 0xDE), lerp(0x54, 0x2B))
}
