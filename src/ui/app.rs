use super::panels::{MainPanel, Sidebar};
use super::services::DataLoader;
use super::state::AppState;
use crate::config::AppConfig;
use crate::data::DataContext;
use std::path::PathBuf;

pub struct DashboardApp {
    state: AppState,
    sidebar: Sidebar,
    main_panel: MainPanel,
}

impl DashboardApp {
    /// `context` is the initial load; an error is shown in the status line
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        config_path: PathBuf,
        context: Result<DataContext, String>,
    ) -> Self {
        let mut state = AppState::new(config, None);
        state.config_path = Some(config_path);
        match context {
            Ok(context) => {
                state.status_message = DataLoader::summary(&context);
                state.set_context(context);
            }
            Err(e) => state.status_message = format!("Error loading data: {}", e),
        }

        Self {
            state,
            sidebar: Sidebar::new(),
            main_panel: MainPanel::new(),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.heading("E-Commerce Dashboard");
        });

        egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
            ui.small("Copyright © Steven 2024");
        });

        egui::SidePanel::left("navigation_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.sidebar.show(ui, &mut self.state);
                });
            });

        // Navigation or a reload may have invalidated the report
        self.state.refresh_report();

        egui::CentralPanel::default().show(ctx, |ui| {
            self.main_panel.show(ui, &self.state);
        });
    }
}
