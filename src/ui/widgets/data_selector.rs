use crate::ui::services::DataLoader;
use crate::ui::state::AppState;

pub struct DataSelector;

impl DataSelector {
    pub fn show(ui: &mut egui::Ui, state: &mut AppState) {
        ui.label(format!("Data folder: {}", state.config.data.data_dir.display()));

        if ui.button("Select Data Folder...").clicked() {
            if let Some(dir) = rfd::FileDialog::new()
                .set_directory(&state.config.data.data_dir)
                .pick_folder()
            {
                match DataLoader::load_dir(&state.config.data, &dir) {
                    Ok((data_config, context)) => {
                        state.status_message = DataLoader::summary(&context);
                        state.config.data = data_config;
                        state.set_context(context);
                    }
                    Err(e) => {
                        log::error!("Failed to load {}: {}", dir.display(), e);
                        state.status_message = format!("Error loading data: {}", e);
                    }
                }
            }
        }

        if state.config_path.is_some() && ui.button("Save Settings").clicked() {
            state.save_config();
        }

        if let Some(context) = &state.context {
            ui.collapsing("Tables", |ui| {
                egui::Grid::new("table_metadata_grid")
                    .striped(true)
                    .show(ui, |ui| {
                        for metadata in context.metadata() {
                            ui.label(metadata.entity.as_str()).on_hover_text(&metadata.file_path);
                            ui.label(format!("{} rows", metadata.num_rows));
                            ui.end_row();
                        }
                    });
            });
        } else {
            ui.label("No data loaded");
        }
    }
}
