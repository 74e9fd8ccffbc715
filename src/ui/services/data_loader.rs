use crate::config::DataConfig;
use crate::data::{DataContext, DatasetLoader};
use std::path::Path;

pub struct DataLoader;

impl DataLoader {
    /// Load every table under `data_dir`, keeping the rest of `config`
    pub fn load_dir(config: &DataConfig, data_dir: &Path) -> Result<(DataConfig, DataContext), String> {
        let config = config.clone().with_data_dir(data_dir);
        let context = Self::load(&config)?;
        Ok((config, context))
    }

    pub fn load(config: &DataConfig) -> Result<DataContext, String> {
        DatasetLoader::load_all(config).map_err(|e| e.to_string())
    }

    /// Status line text for a loaded context
    pub fn summary(context: &DataContext) -> String {
        let rows: usize = context.metadata().iter().map(|m| m.num_rows).sum();
        format!("Loaded {} tables ({} rows)", context.metadata().len(), rows)
    }
}
