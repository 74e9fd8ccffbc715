use super::traits::ConfigSection;
use crate::error::DashboardError;
use crate::types::Entity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Where the source tables live and how they are read
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub data_dir: PathBuf,
    /// Rows scanned for schema inference, 0 scans the whole file
    pub infer_schema_length: usize,
    /// File name overrides keyed by table name (e.g. `orders = "orders.csv"`)
    pub files: BTreeMap<String, String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            infer_schema_length: 10_000,
            files: BTreeMap::new(),
        }
    }
}

impl DataConfig {
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn file_name(&self, entity: Entity) -> &str {
        self.files
            .get(entity.as_str())
            .map(String::as_str)
            .unwrap_or_else(|| entity.default_file_name())
    }

    pub fn path_for(&self, entity: Entity) -> PathBuf {
        self.data_dir.join(self.file_name(entity))
    }

    pub fn schema_inference_rows(&self) -> Option<usize> {
        (self.infer_schema_length > 0).then_some(self.infer_schema_length)
    }
}

impl ConfigSection for DataConfig {
    fn section_name() -> &'static str {
        "data"
    }

    fn validate(&self) -> Result<(), DashboardError> {
        let known: Vec<&str> = Entity::all().iter().map(|e| e.as_str()).collect();
        if let Some(unknown) = self.files.keys().find(|k| !known.contains(&k.as_str())) {
            return Err(DashboardError::Configuration(format!(
                "Unknown table '{}' in [data.files], expected one of {:?}",
                unknown, known
            )));
        }
        if self.files.values().any(|name| name.trim().is_empty()) {
            return Err(DashboardError::Configuration(
                "File names in [data.files] must not be empty".to_string()
            ));
        }
        Ok(())
    }
}
