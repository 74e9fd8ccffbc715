pub mod traits;
pub mod data;
pub mod dashboard;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use data::DataConfig;
pub use dashboard::DashboardConfig;
pub use traits::ConfigSection;
