mod csv;
mod types;
mod validator;

pub use csv::CsvConnector;
pub use types::{
    TableMetadata,
    TablePreview,
};
pub use validator::DataValidator;
