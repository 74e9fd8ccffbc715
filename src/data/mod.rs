pub mod cache;
pub mod connectors;
pub mod context;
pub mod loader;

pub use cache::DerivedCache;
pub use connectors::{CsvConnector, DataValidator, TableMetadata, TablePreview};
pub use context::DataContext;
pub use loader::DatasetLoader;
