use crate::config::AppConfig;
use crate::data::DataContext;
use crate::engines::metrics::{MetricsEngine, ViewReport};
use crate::types::View;
use std::path::PathBuf;

/// Central application state for the UI
pub struct AppState {
    pub config: AppConfig,
    /// Where "Save Settings" writes, `None` disables saving
    pub config_path: Option<PathBuf>,
    pub context: Option<DataContext>,

    // Navigation
    pub view: View,

    // Report for `view`, recomputed only when the view or data changes
    pub report: Option<ViewReport>,

    pub status_message: String,
}

impl AppState {
    pub fn new(config: AppConfig, context: Option<DataContext>) -> Self {
        Self {
            config,
            config_path: None,
            context,
            view: View::default(),
            report: None,
            status_message: "Ready".to_string(),
        }
    }

    pub fn set_context(&mut self, context: DataContext) {
        self.context = Some(context);
        self.report = None;
    }

    /// Persist the current settings, including a data folder picked at runtime
    pub fn save_config(&mut self) {
        let Some(path) = &self.config_path else {
            return;
        };
        self.status_message = match self.config.save_to_file(path) {
            Ok(()) => format!("Settings saved to {}", path.display()),
            Err(e) => {
                log::error!("{}", e);
                format!("Error saving settings: {}", e)
            }
        };
    }

    /// Compute the current view's report if it is missing or stale
    pub fn refresh_report(&mut self) {
        let stale = self.report.as_ref().map_or(true, |r| r.view() != self.view);
        if !stale {
            return;
        }
        if let Some(context) = &self.context {
            let engine = MetricsEngine::new(&self.config.dashboard);
            self.report = Some(engine.report(self.view, context));
        } else {
            self.report = None;
        }
    }
}
