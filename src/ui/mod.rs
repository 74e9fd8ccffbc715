mod app;
mod panels;
mod state;
mod widgets;
mod services;

pub use app::DashboardApp;
pub use services::DataLoader;
pub use state::AppState;
