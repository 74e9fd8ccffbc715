use crate::data::TablePreview;
use crate::types::MetricValue;

pub struct TablePreviewWidget;

impl TablePreviewWidget {
    pub fn show(ui: &mut egui::Ui, id: &str, title: &str, preview: &MetricValue<TablePreview>) {
        ui.strong(title);

        let preview = match preview {
            MetricValue::Available(preview) => preview,
            MetricValue::NoData => {
                ui.label("No rows");
                return;
            }
            MetricValue::Unavailable(reason) => {
                ui.colored_label(egui::Color32::RED, "Unavailable").on_hover_text(reason);
                return;
            }
        };

        egui::ScrollArea::horizontal().id_salt(id).show(ui, |ui| {
            egui::Grid::new(id)
                .striped(true)
                .show(ui, |ui| {
                    // Header
                    for col_name in &preview.columns {
                        ui.strong(col_name);
                    }
                    ui.end_row();

                    // Rows
                    for row in &preview.rows {
                        for cell in row {
                            ui.label(cell);
                        }
                        ui.end_row();
                    }
                });
        });
    }
}
