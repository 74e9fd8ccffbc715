use super::traits::ConfigSection;
use crate::error::DashboardError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub top_categories: usize,
    pub top_products: usize,
    pub preview_rows: usize,
    pub score_decimals: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_categories: 10,
            top_products: 10,
            preview_rows: 5,
            score_decimals: 2,
        }
    }
}

impl ConfigSection for DashboardConfig {
    fn section_name() -> &'static str {
        "dashboard"
    }

    fn validate(&self) -> Result<(), DashboardError> {
        if self.top_categories == 0 || self.top_products == 0 {
            return Err(DashboardError::Configuration(
                "Top-N rankings must show at least one row".to_string()
            ));
        }
        if self.preview_rows == 0 {
            return Err(DashboardError::Configuration(
                "Preview rows must be at least 1".to_string()
            ));
        }
        if self.score_decimals > 6 {
            return Err(DashboardError::Configuration(
                "Score decimals must be between 0 and 6".to_string()
            ));
        }
        Ok(())
    }
}
