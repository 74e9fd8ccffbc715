use crate::types::Entity;
use serde::{Deserialize, Serialize};

/// Metadata about a loaded table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableMetadata {
    pub entity: Entity,
    pub file_path: String,
    pub num_rows: usize,
    pub num_columns: usize,
    pub columns: Vec<String>,
}

/// First rows of a table rendered as strings for UI display
#[derive(Debug, Clone, PartialEq)]
pub struct TablePreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TablePreview {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
