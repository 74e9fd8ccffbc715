use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Invalid column: '{column}' is not present in table {table}")]
    InvalidColumn { table: String, column: String },

    #[error("Lookup miss: no {table} row for key '{key}'")]
    LookupMiss { table: String, key: String },

    #[error("Data loading error: {0}")]
    DataLoading(String),

    #[error("Computation error: {0}")]
    Computation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

impl DashboardError {
    pub fn invalid_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::InvalidColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    pub fn lookup_miss(table: impl Into<String>, key: impl Into<String>) -> Self {
        Self::LookupMiss {
            table: table.into(),
            key: key.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
