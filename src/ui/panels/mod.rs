pub mod sidebar;
pub mod main_panel;

pub use sidebar::Sidebar;
pub use main_panel::MainPanel;
