pub mod bar_chart;
pub mod card;
pub mod data_selector;
pub mod table_preview;

pub use bar_chart::BarChart;
pub use card::{metric_text, MetricCard};
pub use data_selector::DataSelector;
pub use table_preview::TablePreviewWidget;
