use super::connectors::{CsvConnector, DataValidator, TableMetadata};
use super::context::DataContext;
use crate::config::DataConfig;
use crate::error::{DashboardError, Result};
use crate::types::Entity;
use polars::prelude::*;
use rayon::prelude::*;
use std::collections::BTreeMap;

pub struct DatasetLoader;

impl DatasetLoader {
    /// Load all nine tables. Any single failure fails the whole load.
    pub fn load_all(config: &DataConfig) -> Result<DataContext> {
        log::info!("Loading dataset from {}", config.data_dir.display());

        let loaded: Vec<(Entity, DataFrame, TableMetadata)> = Entity::all()
            .into_par_iter()
            .map(|entity| Self::load_table(config, entity))
            .collect::<Result<Vec<_>>>()?;

        let mut tables = BTreeMap::new();
        let mut metadata = Vec::with_capacity(loaded.len());
        for (entity, df, meta) in loaded {
            tables.insert(entity, df);
            metadata.push(meta);
        }
        metadata.sort_by_key(|m| m.entity);

        DataContext::new(tables, metadata)
    }

    fn load_table(config: &DataConfig, entity: Entity) -> Result<(Entity, DataFrame, TableMetadata)> {
        let path = config.path_for(entity);
        let df = CsvConnector::load(&path, config.schema_inference_rows(), entity.text_columns()).map_err(|e| match e {
            DashboardError::DataLoading(msg) => DashboardError::DataLoading(msg),
            other => DashboardError::DataLoading(format!(
                "Failed to load {} ({}): {}",
                entity,
                path.display(),
                other
            )),
        })?;

        log::info!("Loaded {}: {} rows x {} columns", entity, df.height(), df.width());

        let null_report = DataValidator::check_nulls(&df);
        if !null_report.is_empty() {
            log::warn!("Null values detected in {}: {:?}", entity, null_report);
        }

        let metadata = CsvConnector::create_metadata(entity, &path, &df);
        Ok((entity, df, metadata))
    }
}
