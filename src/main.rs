use anyhow::Context;
use eframe::NativeOptions;
use ecomdash::config::ConfigManager;
use ecomdash::ui::{DashboardApp, DataLoader};

const DEFAULT_CONFIG_PATH: &str = "ecomdash.toml";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let manager = ConfigManager::new();
    manager
        .load_from_file(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path))?;
    let config = manager.get();

    // A failed load still opens the window so another folder can be picked
    let context = DataLoader::load(&config.data);
    if let Err(e) = &context {
        log::error!("{}", e);
    }

    let native_options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("E-Commerce Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "ecomdash",
        native_options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config, config_path.into(), context)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start the dashboard window: {}", e))
}
