pub mod counts;
pub mod sales;
pub mod reviews;
pub mod delivery;
pub mod reports;
pub mod engine;

pub use counts::{CountMetrics, FrequencyOrder};
pub use sales::SalesMetrics;
pub use reviews::ReviewMetrics;
pub use delivery::DeliveryMetrics;
pub use reports::{CustomerReport, OrderReport, OverviewReport, ProductReport, ViewReport};
pub use engine::MetricsEngine;
