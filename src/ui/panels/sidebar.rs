use crate::types::View;
use crate::ui::state::AppState;
use crate::ui::widgets::DataSelector;

pub struct Sidebar;

impl Sidebar {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &mut AppState) {
        ui.heading("Navigation");
        ui.separator();

        ui.label("Select an option:");
        egui::ComboBox::from_id_salt("navigation")
            .selected_text(state.view.title())
            .show_ui(ui, |ui| {
                for view in View::all() {
                    ui.selectable_value(&mut state.view, view, view.title());
                }
            });

        ui.separator();

        ui.collapsing("Data", |ui| {
            DataSelector::show(ui, state);
        });

        ui.separator();
        ui.label(&state.status_message);
    }
}
